//! World generator: builds the initial household and its narration.
//!
//! Generation runs in two passes over the registry:
//!
//! 1. **Items** -- each item type draws up to `ceil(max_items / types)`
//!    names from its content pool. Every item starts in the pool.
//! 2. **Rooms** -- each room type is instantiated up to its own limit and a
//!    per-type share of `max_rooms`. Every fixture the room accepts is added;
//!    containers draw up to `container_capacity` compatible items from the
//!    pool. Items never drawn stay in the pool, out of play.
//!
//! The narration lists each room's fixtures in random order, and the rooms
//! themselves in random order.

use homestate_types::{FixtureId, ItemId, RoomId, RoomKind};
use homestate_world::narration::{capitalize_first, indefinite_article};
use homestate_world::placement::describe_contents;
use homestate_world::registry::{Registry, RoomLimit, room_limit};
use homestate_world::{FixtureState, Household, RoomDraft, Toggle, WorldError};
use rand::Rng;
use rand::seq::SliceRandom;
use tracing::{debug, info};

use crate::config::WorldConfig;
use crate::content::ContentPools;
use crate::context::GenerationContext;

/// Errors raised while generating a world.
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    /// A household operation failed.
    #[error("world error: {source}")]
    World {
        /// The underlying world error.
        #[from]
        source: WorldError,
    },

    /// The generated world has nothing that could ever act.
    #[error("generated world has no eligible action ({rooms} rooms, {items} items in play)")]
    NoEligibleAction {
        /// Rooms generated.
        rooms: usize,
        /// Items drawn into containers.
        items: usize,
    },
}

/// A freshly generated household with its narrated description.
#[derive(Debug, Clone)]
pub struct GeneratedWorld {
    /// The household.
    pub household: Household,
    /// Paragraph-per-room narration of the initial state.
    pub narration: String,
}

/// Builds households from a registry and the world caps.
#[derive(Debug, Clone, Copy)]
pub struct WorldGenerator<'a> {
    registry: &'a Registry,
    config: &'a WorldConfig,
}

impl<'a> WorldGenerator<'a> {
    /// Generator over `registry` with the caps in `config`.
    pub const fn new(registry: &'a Registry, config: &'a WorldConfig) -> Self {
        Self { registry, config }
    }

    /// Generate a household, drawing randomness and names from `ctx`.
    pub fn generate(&self, ctx: &mut GenerationContext) -> Result<GeneratedWorld, GenerateError> {
        let mut household = Household::new();
        let mut pool = self.generate_items(&mut household, ctx)?;
        let mut paragraphs = self.generate_rooms(&mut household, &mut pool, ctx)?;
        paragraphs.shuffle(&mut ctx.rng);

        let in_play = household.active_items().count();
        if !household.has_eligible_action() {
            return Err(GenerateError::NoEligibleAction {
                rooms: household.rooms().len(),
                items: in_play,
            });
        }
        household.check_invariants()?;

        info!(
            seed = ctx.seed(),
            rooms = household.rooms().len(),
            fixtures = household.fixtures().len(),
            items = in_play,
            pooled = pool.len(),
            "world generated"
        );
        Ok(GeneratedWorld {
            household,
            narration: paragraphs.join("\n\n"),
        })
    }

    fn generate_items(
        &self,
        household: &mut Household,
        ctx: &mut GenerationContext,
    ) -> Result<Vec<ItemId>, GenerateError> {
        let kinds: Vec<_> = self.registry.items().collect();
        let quota = per_type_quota(self.config.max_items, kinds.len());
        let mut pool = Vec::new();

        for kind in kinds {
            for _ in 0..quota {
                let Some(draft) = ctx.content.draw_item(kind, &mut ctx.rng) else {
                    break;
                };
                let toggle = Toggle::for_item(kind, &mut ctx.rng);
                match household.add_item(draft, toggle) {
                    Ok(id) => pool.push(id),
                    Err(WorldError::DuplicateSymbol(symbol)) => {
                        debug!(%symbol, "duplicate item name skipped");
                    }
                    Err(err) => return Err(err.into()),
                }
            }
        }
        Ok(pool)
    }

    /// Instantiate rooms, returning one narration paragraph per room.
    fn generate_rooms(
        &self,
        household: &mut Household,
        pool: &mut Vec<ItemId>,
        ctx: &mut GenerationContext,
    ) -> Result<Vec<String>, GenerateError> {
        let kinds: Vec<_> = self.registry.rooms().collect();
        let quota = per_type_quota(self.config.max_rooms, kinds.len());
        let mut paragraphs = Vec::new();

        for kind in kinds {
            let limit = match room_limit(kind) {
                RoomLimit::Once => quota.min(1),
                RoomLimit::PerOwnerName => quota,
            };
            for _ in 0..limit {
                if household.rooms().len() >= self.config.max_rooms {
                    break;
                }
                let Some(draft) = room_draft(kind, &mut ctx.content, &mut ctx.rng) else {
                    break;
                };
                let paragraph = match household.add_room(draft) {
                    Ok(room) => self.furnish(household, room, pool, ctx)?,
                    Err(WorldError::DuplicateSymbol(symbol)) => {
                        debug!(%symbol, "duplicate room name skipped");
                        continue;
                    }
                    Err(err) => return Err(err.into()),
                };
                paragraphs.push(paragraph);
            }
        }
        Ok(paragraphs)
    }

    /// Add every fixture the room accepts and narrate the result.
    fn furnish(
        &self,
        household: &mut Household,
        room: RoomId,
        pool: &mut Vec<ItemId>,
        ctx: &mut GenerationContext,
    ) -> Result<String, GenerateError> {
        let kind = household.room(room)?.kind;
        let mut fixtures = Vec::new();
        for fixture_kind in self.registry.room_fixtures(kind) {
            let state = FixtureState::initial(fixture_kind, &mut ctx.rng);
            let fixture = household.add_fixture(room, fixture_kind, state)?;
            if household.fixture(fixture)?.is_container() {
                household.populate(
                    fixture,
                    pool,
                    self.config.container_capacity,
                    &mut ctx.rng,
                )?;
            }
            fixtures.push(fixture);
        }
        fixtures.shuffle(&mut ctx.rng);

        let title = capitalize_first(&household.room(room)?.name);
        let mut paragraph = String::new();
        for (i, fixture) in fixtures.iter().enumerate() {
            let name = &household.fixture(*fixture)?.name;
            paragraph.push_str(&format!(
                "{title}{} has {} {name}. {}",
                if i == 0 { "" } else { " also" },
                indefinite_article(name),
                describe_fixture(household, *fixture)?
            ));
        }
        debug!(room = %title, fixtures = fixtures.len(), "room furnished");
        Ok(String::from(paragraph.trim_end()))
    }
}

/// Share of a global cap given to each of `types` types, rounded up.
const fn per_type_quota(cap: usize, types: usize) -> usize {
    if types == 0 { 0 } else { cap.div_ceil(types) }
}

fn room_draft<R: Rng + ?Sized>(
    kind: RoomKind,
    content: &mut ContentPools,
    rng: &mut R,
) -> Option<RoomDraft> {
    match kind {
        RoomKind::Kitchen => Some(RoomDraft::kitchen()),
        RoomKind::LivingRoom => Some(RoomDraft::living_room()),
        RoomKind::Bedroom => content
            .draw_bedroom_owner(rng)
            .map(|owner| RoomDraft::bedroom(&owner)),
    }
}

/// Contents and toggle sentences for one fixture.
fn describe_fixture(household: &Household, fixture: FixtureId) -> Result<String, WorldError> {
    let entry = household.fixture(fixture)?;
    let mut text = String::new();
    if let Some(compartments) = entry.compartments {
        let contents = household.contents(fixture);
        text.push_str(&describe_contents(compartments, &entry.name, &contents));
    }
    if let Some(toggle) = entry.toggle {
        text.push_str(&toggle.describe(&entry.name));
    }
    Ok(text)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use homestate_types::{FixtureKind, ItemKind};

    use super::*;

    fn generate(seed: u64, config: &WorldConfig) -> Result<GeneratedWorld, GenerateError> {
        let registry = Registry::standard();
        let mut ctx = GenerationContext::new(seed, ContentPools::default());
        WorldGenerator::new(&registry, config).generate(&mut ctx)
    }

    #[test]
    fn default_world_respects_caps() {
        let config = WorldConfig::default();
        for seed in 0..10 {
            let world = generate(seed, &config).unwrap();
            let house = &world.household;
            assert!(house.rooms().len() <= config.max_rooms);
            assert!(house.items().len() <= config.max_items);
            for fixture in house.fixtures() {
                assert!(house.contents(fixture.id).len() <= config.container_capacity);
            }
            house.check_invariants().unwrap();
        }
    }

    #[test]
    fn kitchen_and_living_room_appear_once() {
        let config = WorldConfig {
            max_rooms: 12,
            ..WorldConfig::default()
        };
        let world = generate(3, &config).unwrap();
        let rooms = world.household.rooms();
        let kitchens = rooms.iter().filter(|r| r.kind == RoomKind::Kitchen).count();
        let living = rooms.iter().filter(|r| r.kind == RoomKind::LivingRoom).count();
        let bedrooms = rooms.iter().filter(|r| r.kind == RoomKind::Bedroom).count();
        assert_eq!(kitchens, 1);
        assert_eq!(living, 1);
        assert_eq!(bedrooms, 4);
    }

    #[test]
    fn narration_has_one_paragraph_per_room() {
        let world = generate(11, &WorldConfig::default()).unwrap();
        let paragraphs: Vec<&str> = world.narration.split("\n\n").collect();
        assert_eq!(paragraphs.len(), world.household.rooms().len());
        for room in world.household.rooms() {
            let title = capitalize_first(&room.name);
            assert!(
                paragraphs
                    .iter()
                    .any(|p| p.starts_with(&format!("{title} has "))),
                "no paragraph for {title}"
            );
        }
    }

    #[test]
    fn kitchen_paragraph_mentions_fridge_contents() {
        let config = WorldConfig {
            max_rooms: 1,
            ..WorldConfig::default()
        };
        let world = generate(5, &config).unwrap();
        let house = &world.household;
        let fridge = house
            .fixtures()
            .iter()
            .find(|f| f.kind == FixtureKind::Fridge)
            .unwrap();
        for item in house.contents(fridge.id) {
            assert_eq!(item.kind, ItemKind::Food);
            assert!(world.narration.contains(&item.name));
        }
        assert!(world.narration.contains("The kitchen has a"));
    }

    #[test]
    fn same_seed_same_world() {
        let config = WorldConfig::default();
        let a = generate(21, &config).unwrap();
        let b = generate(21, &config).unwrap();
        assert_eq!(a.narration, b.narration);
        assert_eq!(a.household.items(), b.household.items());
    }

    #[test]
    fn empty_content_means_no_eligible_action() {
        let registry = Registry::new(&[RoomKind::Kitchen], &[FixtureKind::Fridge], &[ItemKind::Food]);
        let config = WorldConfig::default();
        let content = ContentPools {
            foods: crate::content::WordPool::default(),
            ..ContentPools::default()
        };
        let mut ctx = GenerationContext::new(1, content);
        let result = WorldGenerator::new(&registry, &config).generate(&mut ctx);
        assert!(matches!(
            result,
            Err(GenerateError::NoEligibleAction { rooms: 1, items: 0 })
        ));
    }
}
