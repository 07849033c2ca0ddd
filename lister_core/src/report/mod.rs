pub mod graph_writer;
pub mod lister;
