pub mod step1_fetch;
pub mod step2_import;
pub mod step3_validate;
