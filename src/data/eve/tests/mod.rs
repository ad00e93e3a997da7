use heimdall_test_utils::prelude::*;

use crate::data::eve::{
    alliance::AllianceRepository, character::CharacterRepository,
    corporation::CorporationRepository,
};
