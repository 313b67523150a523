use cucumber::given;

use crate::cucumber::{world::FoodOrderSystem, FoodOrderWorld};

#[given("a fresh install")]
async fn fresh_database(world: &mut FoodOrderWorld) {
    let system = FoodOrderSystem::new().await;
    world.system = Some(system);
}
