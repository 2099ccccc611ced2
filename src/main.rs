// Load modules
pub mod commands;
pub mod enterypoint;
pub mod modules;
pub mod utils;

fn main() {
    enterypoint::enterypoint();
}
