pub mod debug;
pub mod direction;
pub mod elevator_car;
pub mod elevator_status;
pub mod floor_registry;
pub mod manifest;
