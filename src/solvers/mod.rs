pub mod bfgs;
