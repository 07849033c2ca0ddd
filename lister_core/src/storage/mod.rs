pub mod lister_config;
