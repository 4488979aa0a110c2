pub mod helper;

mod activities;
mod batch_processing;
mod cors;
mod guides;
