use heimdall::{
    batch::sink::BatchRecord,
    error::{worker::WorkerError, Error},
    model::{
        batch::{BatchState, Lane},
        credential::Credential,
        entity::EntityKind,
        task::TaskCategory,
    },
};
use heimdall_test_utils::prelude::*;

use crate::util::{handler::FailingHandler, TestEngine};

mod dispatch;
mod failures;
