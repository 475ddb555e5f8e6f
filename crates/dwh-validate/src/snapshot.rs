//! The silver tables read back for checking.

use dwh_model::{
    SilverCategory, SilverCustomer, SilverCustomerDemographic, SilverLocation, SilverProduct,
    SilverSalesDetail,
};
use dwh_store::TableStore;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SilverSnapshot {
    pub customers: Vec<SilverCustomer>,
    pub products: Vec<SilverProduct>,
    pub sales: Vec<SilverSalesDetail>,
    pub demographics: Vec<SilverCustomerDemographic>,
    pub locations: Vec<SilverLocation>,
    pub categories: Vec<SilverCategory>,
}

impl SilverSnapshot {
    /// Scan every silver table from `store`.
    pub fn from_store(store: &impl TableStore) -> dwh_store::Result<Self> {
        Ok(Self {
            customers: store.scan()?,
            products: store.scan()?,
            sales: store.scan()?,
            demographics: store.scan()?,
            locations: store.scan()?,
            categories: store.scan()?,
        })
    }
}
