pub mod csidh;
