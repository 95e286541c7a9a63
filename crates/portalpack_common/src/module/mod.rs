pub mod normal_module;
