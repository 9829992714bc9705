pub mod e3dc;
