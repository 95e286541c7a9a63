pub mod isolating;
