pub mod csidh;
pub mod csidh_parameters;
pub mod policy;
pub mod simba;
pub mod validate;
