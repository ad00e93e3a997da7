//! Names given to mock entity records.

pub const MOCK_ALLIANCE_NAME: &str = "Autumn.";
pub const MOCK_ALLIANCE_TICKER: &str = "AUTMN";
pub const MOCK_CORPORATION_NAME: &str = "The Order of Autumn";
pub const MOCK_CORPORATION_TICKER: &str = "F4LL.";
pub const MOCK_CHARACTER_NAME: &str = "Hyziri";
