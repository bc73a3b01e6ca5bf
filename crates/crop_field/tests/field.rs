use std::sync::Once;

use crop_core::{
    CropCatalog, CropTypeDefinition, Facing, GridPosition, ItemCode, PresentationIntent,
    ToolActionResult, YieldEntry,
};
use crop_field::{Field, FieldError, SPAWN_SCATTER};
use pretty_assertions::assert_eq;
use rand::rngs::StdRng;
use rand::SeedableRng;

const HOE: ItemCode = ItemCode(1);
const SCYTHE: ItemCode = ItemCode(2);
const PARSNIP_SEED: ItemCode = ItemCode(10);
const PARSNIP: ItemCode = ItemCode(11);
const BERRY_SEED: ItemCode = ItemCode(20);
const BERRY: ItemCode = ItemCode(21);
const BERRY_REGROWTH: ItemCode = ItemCode(22);
const GHOST_SEED: ItemCode = ItemCode(30);

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(farm_logging::initialize_for_tests);
}

fn catalog() -> CropCatalog {
    let parsnip = CropTypeDefinition::new(PARSNIP_SEED)
        .with_tool(HOE, 2)
        .with_yield(YieldEntry {
            item: PARSNIP,
            min_quantity: 3,
            max_quantity: 3,
            spawn_at_actor: false,
        });

    let mut berry = CropTypeDefinition::new(BERRY_SEED)
        .with_tool(SCYTHE, 1)
        .with_yield(YieldEntry {
            item: BERRY,
            min_quantity: 2,
            max_quantity: 2,
            spawn_at_actor: true,
        })
        .with_regrowth(BERRY_REGROWTH);
    berry.harvested_animation = true;
    berry.hide_before_harvested_animation = true;

    let berry_regrowth = CropTypeDefinition::new(BERRY_REGROWTH)
        .with_tool(SCYTHE, 1)
        .with_yield(YieldEntry {
            item: BERRY,
            min_quantity: 1,
            max_quantity: 1,
            spawn_at_actor: true,
        });

    let ghost = CropTypeDefinition::new(GHOST_SEED)
        .with_tool(SCYTHE, 1)
        .with_regrowth(ItemCode(999));

    CropCatalog::new(vec![parsnip, berry, berry_regrowth, ghost]).expect("valid catalog")
}

#[test]
fn plant_rejects_unknown_seed_and_occupied_cell() {
    init_logging();
    let mut field = Field::new(catalog());
    let at = GridPosition::new(1, 1);

    assert_eq!(field.plant(at, ItemCode(77)), Err(FieldError::UnknownSeed(ItemCode(77))));
    field.plant(at, PARSNIP_SEED).expect("plant");
    assert_eq!(field.plant(at, BERRY_SEED), Err(FieldError::Occupied(at)));

    let cell = field.grid().get(at).expect("cell written");
    assert_eq!(cell.seed, Some(PARSNIP_SEED));
    assert_eq!(cell.growth_days, Some(0));
}

#[test]
fn tool_on_empty_cell_is_an_error() {
    let mut field = Field::new(catalog());
    let mut rng = StdRng::seed_from_u64(1);
    let at = GridPosition::new(9, 9);
    assert_eq!(
        field.use_tool(at, HOE, Facing::Left, &mut rng),
        Err(FieldError::NoCrop(at))
    );
}

#[test]
fn immediate_harvest_scatters_items_and_clears_cell() {
    init_logging();
    let mut field = Field::new(catalog());
    let mut rng = StdRng::seed_from_u64(2);
    let at = GridPosition::new(5, -2);
    field.plant(at, PARSNIP_SEED).expect("plant");

    let first = field.use_tool(at, HOE, Facing::Right, &mut rng).expect("use");
    assert_eq!(
        first.result,
        ToolActionResult::Progressed {
            current: 1,
            required: 2
        }
    );
    assert_eq!(field.crop(at).map(|crop| crop.action_count()), Some(1));

    let second = field.use_tool(at, HOE, Facing::Right, &mut rng).expect("use");
    assert!(matches!(second.result, ToolActionResult::Harvested(_)));
    assert!(field.crop(at).is_none());
    assert!(!field.is_pending(at));

    let cell = field.grid().get(at).expect("cell");
    assert_eq!(cell.seed, None);
    assert_eq!(cell.growth_days, None);

    assert_eq!(field.scene().len(), 3);
    for item in field.scene().items() {
        assert_eq!(item.item, PARSNIP);
        assert!((item.x - at.x as f32).abs() <= SPAWN_SCATTER);
        assert!((item.y - at.y as f32).abs() <= SPAWN_SCATTER);
    }
    assert_eq!(field.inventory().quantity(PARSNIP), 0);

    assert_eq!(
        field.use_tool(at, HOE, Facing::Right, &mut rng),
        Err(FieldError::NoCrop(at))
    );
}

#[test]
fn animated_harvest_waits_for_animation_then_regrows() {
    init_logging();
    let mut field = Field::new(catalog());
    let mut rng = StdRng::seed_from_u64(3);
    let at = GridPosition::new(0, 4);
    field.plant(at, BERRY_SEED).expect("plant");

    let used = field.use_tool(at, SCYTHE, Facing::Left, &mut rng).expect("use");
    assert!(used.intents.contains(&PresentationIntent::HideSprite));
    assert!(field.is_pending(at));
    assert_eq!(field.inventory().quantity(BERRY), 0);
    assert_eq!(field.grid().get(at).and_then(|cell| cell.seed), None);
    assert_eq!(field.plant(at, PARSNIP_SEED), Err(FieldError::Occupied(at)));

    field.animation_finished(at, &mut rng).expect("pending harvest");

    assert!(!field.is_pending(at));
    assert_eq!(field.inventory().quantity(BERRY), 2);
    assert!(field.scene().is_empty());
    let cell = field.grid().get(at).expect("cell");
    assert_eq!(cell.seed, Some(BERRY_REGROWTH));
    assert_eq!(cell.growth_days, Some(0));
    assert_eq!(cell.days_since_harvest, None);
    assert_eq!(cell.days_since_watered, None);

    let regrown = field.crop(at).expect("regrowth tracker");
    assert_eq!(regrown.action_count(), 0);
    assert_eq!(regrown.definition().seed, BERRY_REGROWTH);

    field.use_tool(at, SCYTHE, Facing::Up, &mut rng).expect("use regrowth");
    assert_eq!(field.inventory().quantity(BERRY), 3);
    assert_eq!(
        field.animation_finished(at, &mut rng),
        Err(FieldError::NothingPending(at))
    );
}

#[test]
fn settle_pending_applies_waiting_harvests() {
    let mut field = Field::new(catalog());
    let mut rng = StdRng::seed_from_u64(4);
    let at = GridPosition::new(2, 2);
    field.plant(at, BERRY_SEED).expect("plant");
    field.use_tool(at, SCYTHE, Facing::Down, &mut rng).expect("use");

    field.settle_pending(&mut rng);

    assert!(!field.is_pending(at));
    assert_eq!(field.inventory().quantity(BERRY), 2);
}

#[test]
fn settled_snapshot_keeps_yields_waiting_on_animation() {
    let mut field = Field::new(catalog());
    let mut rng = StdRng::seed_from_u64(4);
    let at = GridPosition::new(6, 1);
    field.plant(at, BERRY_SEED).expect("plant");
    field.use_tool(at, SCYTHE, Facing::Right, &mut rng).expect("use");

    let unsettled = field.snapshot();
    assert!(unsettled.inventory.is_empty());
    assert!(unsettled.crops.is_empty());

    let snapshot = field.settled_snapshot(&mut rng);

    assert!(!field.is_pending(at));
    assert_eq!(snapshot.inventory, vec![(BERRY, 2)]);
    assert_eq!(snapshot.crops.len(), 1);
    assert_eq!(snapshot.crops[0].seed, BERRY_REGROWTH);
    assert_eq!(snapshot.crops[0].action_count, 0);
}

#[test]
fn regrowth_into_unknown_seed_replants_cell_only() {
    init_logging();
    let mut field = Field::new(catalog());
    let mut rng = StdRng::seed_from_u64(5);
    let at = GridPosition::new(3, 3);
    field.plant(at, GHOST_SEED).expect("plant");

    field.use_tool(at, SCYTHE, Facing::Right, &mut rng).expect("use");

    assert_eq!(field.grid().get(at).and_then(|cell| cell.seed), Some(ItemCode(999)));
    assert!(field.crop(at).is_none());
}

#[test]
fn snapshot_restore_keeps_progress() {
    let mut field = Field::new(catalog());
    let mut rng = StdRng::seed_from_u64(6);
    let growing = GridPosition::new(1, 0);
    let harvested = GridPosition::new(2, 0);
    field.plant(growing, PARSNIP_SEED).expect("plant");
    field.plant(harvested, PARSNIP_SEED).expect("plant");
    field.use_tool(growing, HOE, Facing::Right, &mut rng).expect("use");
    field.use_tool(harvested, HOE, Facing::Right, &mut rng).expect("use");
    field.use_tool(harvested, HOE, Facing::Right, &mut rng).expect("use");

    let snapshot = field.snapshot();
    let restored = Field::restore(catalog(), snapshot.clone());

    assert_eq!(restored.snapshot(), snapshot);
    assert_eq!(restored.crop(growing).map(|crop| crop.action_count()), Some(1));
    assert_eq!(restored.scene().len(), 3);
}

#[test]
fn restore_drops_crops_missing_from_catalog() {
    init_logging();
    let mut field = Field::new(catalog());
    let at = GridPosition::new(0, 0);
    field.plant(at, PARSNIP_SEED).expect("plant");

    let smaller = CropCatalog::new(vec![CropTypeDefinition::new(BERRY_SEED)]).expect("catalog");
    let restored = Field::restore(smaller, field.snapshot());

    assert_eq!(restored.catalog().len(), 1);
    assert!(restored.crop(at).is_none());
    assert_eq!(restored.grid().get(at).and_then(|cell| cell.seed), Some(PARSNIP_SEED));
}
