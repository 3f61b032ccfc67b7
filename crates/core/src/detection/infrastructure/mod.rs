pub mod closure_engine;
