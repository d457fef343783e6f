// Game logic
//
// - characters: the player character and its activity state machine
// - world: collaborator traits the states drive
// - items: resource nodes and item descriptors
// - sandbox: in-memory world for headless runs and integration tests

pub mod characters;
pub mod items;
pub mod sandbox;
pub mod world;
