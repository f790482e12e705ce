//! Economy model -> entity mapper

use ledger_core::EconomyRecord;

use crate::models::EconomyModel;

impl From<EconomyModel> for EconomyRecord {
    fn from(model: EconomyModel) -> Self {
        EconomyRecord {
            time: model.time,
            data: model.data.0,
        }
    }
}
