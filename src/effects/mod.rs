pub mod fx;
