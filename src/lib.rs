pub mod beans;
