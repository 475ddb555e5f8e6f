//! Staged source fixtures shared by the load tests.

use std::fs;
use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime};
use dwh_core::PipelineContext;

pub const CUST_INFO: &str = "\
cst_id,cst_key,cst_firstname,cst_lastname,cst_marital_status,cst_gndr,cst_create_date
11000,AW00011000, Jon ,Yang ,M,M,2025-10-06
11000,AW00011000,Jon,Yang,M,M,2025-10-07
11001,AW00011001,Eugene,Huang,S,F,2025-10-06
,AW00011002,Ruben,Torres,M,M,2025-10-06
";

pub const PRD_INFO: &str = "\
prd_id,prd_key,prd_nm,prd_cost,prd_line,prd_start_dt,prd_end_dt
210,CO-RF-FR-R92B-58,HL Road Frame - Black- 58,,R ,2003-07-01,
211,CO-RF-FR-R92R-58,HL Road Frame - Red- 58,,R ,2003-07-01,
212,AC-HE-HL-U509-R,Sport-100 Helmet- Red,12,S ,2011-07-01,2007-12-28
213,AC-HE-HL-U509-R,Sport-100 Helmet- Red,14,S ,2012-07-01,2008-12-27
";

pub const SALES_DETAILS: &str = "\
sls_ord_num,sls_prd_key,sls_cust_id,sls_order_dt,sls_ship_dt,sls_due_dt,sls_sales,sls_quantity,sls_price
SO43697,FR-R92B-58,11000,20101229,20110105,20110110,3578,1,3578
SO43698,HL-U509-R,11001,0,20110105,20110110,,2,14
SO43699,HL-U509-R,11001,20101229,20110105,20110110,-28,2,14
";

pub const CUST_AZ12: &str = "\
CID,BDATE,GEN
NASAW00011000,1971-10-06,Male
AW00011001,2050-01-01, F
";

pub const LOC_A101: &str = "\
CID,CNTRY
AW-00011000,Australia
AW-00011001,US
AW-00011002,
";

pub const PX_CAT_G1V2: &str = "\
ID,CAT,SUBCAT,MAINTENANCE
CO_RF,Components,Road Frames,No
AC_HE,Accessories,Helmets,Yes
";

/// Write every source file under `root` in the default layout.
pub fn stage_sources(root: &Path) {
    let files = [
        ("source_crm/cust_info.csv", CUST_INFO),
        ("source_crm/prd_info.csv", PRD_INFO),
        ("source_crm/sales_details.csv", SALES_DETAILS),
        ("source_erp/CUST_AZ12.csv", CUST_AZ12),
        ("source_erp/LOC_A101.csv", LOC_A101),
        ("source_erp/PX_CAT_G1V2.csv", PX_CAT_G1V2),
    ];
    for (path, contents) in files {
        let path = root.join(path);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }
}

pub fn started() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 6, 1)
        .unwrap()
        .and_hms_opt(2, 0, 0)
        .unwrap()
}

pub fn context() -> PipelineContext {
    PipelineContext::new(started())
}
