pub use sea_orm_migration::prelude::*;

mod m20250612_000001_create_draw_categories;
mod m20250612_000002_create_draws;
mod m20250612_000003_seed_draw_categories;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250612_000001_create_draw_categories::Migration),
            Box::new(m20250612_000002_create_draws::Migration),
            Box::new(m20250612_000003_seed_draw_categories::Migration),
        ]
    }
}
