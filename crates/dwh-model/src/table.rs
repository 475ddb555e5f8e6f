//! Table identifiers and layer qualification.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Upstream system a table is staged from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SourceSystem {
    Crm,
    Erp,
}

impl SourceSystem {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Crm => "CRM",
            Self::Erp => "ERP",
        }
    }
}

/// Warehouse layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layer {
    /// Raw, unmodified staged records.
    Bronze,
    /// Cleaned, standardized, deduplicated records.
    Silver,
}

impl Layer {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Bronze => "bronze",
            Self::Silver => "silver",
        }
    }

    /// Banner label used in load logs.
    pub fn label(self) -> &'static str {
        match self {
            Self::Bronze => "Bronze",
            Self::Silver => "Silver",
        }
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One of the six warehouse tables.
///
/// Declaration order is the fixed load sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableId {
    CrmCustInfo,
    CrmPrdInfo,
    CrmSalesDetails,
    ErpCustAz12,
    ErpLocA101,
    ErpPxCatG1v2,
}

impl TableId {
    /// All tables in load order.
    pub const ALL: [TableId; 6] = [
        TableId::CrmCustInfo,
        TableId::CrmPrdInfo,
        TableId::CrmSalesDetails,
        TableId::ErpCustAz12,
        TableId::ErpLocA101,
        TableId::ErpPxCatG1v2,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::CrmCustInfo => "crm_cust_info",
            Self::CrmPrdInfo => "crm_prd_info",
            Self::CrmSalesDetails => "crm_sales_details",
            Self::ErpCustAz12 => "erp_cust_az12",
            Self::ErpLocA101 => "erp_loc_a101",
            Self::ErpPxCatG1v2 => "erp_px_cat_g1v2",
        }
    }

    /// Parse a table name, ignoring case and surrounding whitespace.
    pub fn parse(name: &str) -> Option<Self> {
        let needle = name.trim();
        Self::ALL
            .into_iter()
            .find(|table| table.name().eq_ignore_ascii_case(needle))
    }

    pub fn source_system(self) -> SourceSystem {
        match self {
            Self::CrmCustInfo | Self::CrmPrdInfo | Self::CrmSalesDetails => SourceSystem::Crm,
            Self::ErpCustAz12 | Self::ErpLocA101 | Self::ErpPxCatG1v2 => SourceSystem::Erp,
        }
    }

    /// Path of the staged file relative to the source root.
    pub fn default_source_path(self) -> &'static str {
        match self {
            Self::CrmCustInfo => "source_crm/cust_info.csv",
            Self::CrmPrdInfo => "source_crm/prd_info.csv",
            Self::CrmSalesDetails => "source_crm/sales_details.csv",
            Self::ErpCustAz12 => "source_erp/CUST_AZ12.csv",
            Self::ErpLocA101 => "source_erp/LOC_A101.csv",
            Self::ErpPxCatG1v2 => "source_erp/PX_CAT_G1V2.csv",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::CrmCustInfo => "Customers",
            Self::CrmPrdInfo => "Products",
            Self::CrmSalesDetails => "Sales details",
            Self::ErpCustAz12 => "Customer demographics",
            Self::ErpLocA101 => "Customer locations",
            Self::ErpPxCatG1v2 => "Product categories",
        }
    }

    pub fn in_layer(self, layer: Layer) -> TableRef {
        TableRef { layer, table: self }
    }
}

impl fmt::Display for TableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A table qualified by its layer, rendered as `layer.table`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TableRef {
    pub layer: Layer,
    pub table: TableId,
}

impl TableRef {
    pub const fn new(layer: Layer, table: TableId) -> Self {
        Self { layer, table }
    }

    pub const fn bronze(table: TableId) -> Self {
        Self::new(Layer::Bronze, table)
    }

    pub const fn silver(table: TableId) -> Self {
        Self::new(Layer::Silver, table)
    }
}

impl fmt::Display for TableRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.layer, self.table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_sequence_puts_crm_before_erp() {
        let systems: Vec<_> = TableId::ALL.iter().map(|t| t.source_system()).collect();
        assert_eq!(
            systems,
            vec![
                SourceSystem::Crm,
                SourceSystem::Crm,
                SourceSystem::Crm,
                SourceSystem::Erp,
                SourceSystem::Erp,
                SourceSystem::Erp,
            ]
        );
    }

    #[test]
    fn table_ref_display() {
        assert_eq!(
            TableRef::silver(TableId::CrmCustInfo).to_string(),
            "silver.crm_cust_info"
        );
        assert_eq!(
            TableRef::bronze(TableId::ErpPxCatG1v2).to_string(),
            "bronze.erp_px_cat_g1v2"
        );
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!(TableId::parse(" CRM_PRD_INFO "), Some(TableId::CrmPrdInfo));
        assert_eq!(TableId::parse("gold_dim"), None);
    }

    #[test]
    fn serde_name_matches_table_name() {
        for table in TableId::ALL {
            let json = serde_json::to_string(&table).unwrap();
            assert_eq!(json, format!("\"{}\"", table.name()));
        }
    }
}
