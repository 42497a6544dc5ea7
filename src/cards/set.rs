//! The built-in card set.
//!
//! A small core set covering every keyword and effect the engine codes:
//! basic lands, pain lands, vanilla and evasive creatures, mana creatures,
//! burn, pump, counters, removal, card draw, tutors, tokens and an aura.

use log::warn;

use super::catalog::CardCatalog;
use super::color::Color;
use super::keywords::{BasicLandType, Keyword};
use super::template::{CardTemplate, CardTemplateBuilder, CardType, Rarity};
use crate::abilities::{AbilityCost, AbilityDef};
use crate::effects::{Amount, Effect, TargetKind, TargetRestriction};
use crate::mana::{ManaCost, ManaProduction, ManaType};

/// Name of the token template created by Raise the Alarm.
pub const SOLDIER_TOKEN: &str = "Soldier";

fn creature(name: &str, cost: &str, subtype: &str, power: &str, toughness: &str) -> CardTemplateBuilder {
    CardTemplate::builder(name)
        .cost(cost)
        .type_line(&format!("Creature — {subtype}"))
        .stats(power, toughness)
}

fn spell(name: &str, cost: &str, card_type: &str, effect: Effect, oracle: &str) -> CardTemplateBuilder {
    CardTemplate::builder(name)
        .cost(cost)
        .type_line(card_type)
        .effect(effect)
        .oracle(oracle)
}

fn pain_land(name: &str, first: Color, second: Color) -> CardTemplateBuilder {
    CardTemplate::builder(name)
        .type_line("Land")
        .rarity(Rarity::Rare)
        .oracle(&format!(
            "{{T}}: Add {{C}}.\n{{T}}: Add {{{}}} or {{{}}}. {name} deals 1 damage to you.",
            first.symbol(),
            second.symbol()
        ))
        .ability(AbilityDef::tap_for(ManaProduction::single(ManaType::Colorless)))
        .ability(AbilityDef::painful_tap_for(
            ManaProduction::Choice(smallvec::smallvec![first, second]),
            1,
        ))
}

fn ping(cost: AbilityCost) -> AbilityDef {
    AbilityDef::new(cost, Effect::damage(1))
}

fn lands() -> Vec<CardTemplateBuilder> {
    let mut cards: Vec<CardTemplateBuilder> = BasicLandType::ALL
        .into_iter()
        .map(|land| {
            CardTemplate::builder(land.name())
                .type_line(&format!("Basic Land — {}", land.name()))
                .rarity(Rarity::Special)
        })
        .collect();

    cards.push(
        CardTemplate::builder("Wastes")
            .type_line("Basic Land")
            .rarity(Rarity::Special)
            .oracle("{T}: Add {C}.")
            .ability(AbilityDef::tap_for(ManaProduction::single(ManaType::Colorless))),
    );

    use Color::*;
    cards.extend([
        pain_land("Adarkar Wastes", White, Blue),
        pain_land("Underground River", Blue, Black),
        pain_land("Sulfurous Springs", Black, Red),
        pain_land("Karplusan Forest", Red, Green),
        pain_land("Brushland", Green, White),
        pain_land("Caves of Koilos", White, Black),
        pain_land("Shivan Reef", Blue, Red),
        pain_land("Llanowar Wastes", Black, Green),
        pain_land("Battlefield Forge", Red, White),
        pain_land("Yavimaya Coast", Green, Blue),
    ]);

    cards.push(
        CardTemplate::builder("City of Brass")
            .type_line("Land")
            .rarity(Rarity::Rare)
            .oracle("Whenever City of Brass becomes tapped, it deals 1 damage to you.\n{T}: Add one mana of any color.")
            .ability(AbilityDef::painful_tap_for(ManaProduction::AnyColor, 1)),
    );

    cards
}

fn creatures() -> Vec<CardTemplateBuilder> {
    vec![
        creature("Grizzly Bears", "{1}{G}", "Bear", "2", "2"),
        creature("Savannah Lions", "{W}", "Cat", "2", "1"),
        creature("Gray Ogre", "{2}{R}", "Ogre", "2", "2"),
        creature("Hill Giant", "{3}{R}", "Giant", "3", "3"),
        creature("Walking Corpse", "{1}{B}", "Zombie", "2", "2"),
        creature("Craw Wurm", "{4}{G}{G}", "Wurm", "6", "4"),
        creature("Wind Drake", "{2}{U}", "Drake", "2", "2")
            .keyword(Keyword::Flying)
            .oracle("Flying"),
        creature("Serra Angel", "{3}{W}{W}", "Angel", "4", "4")
            .keyword(Keyword::Flying)
            .keyword(Keyword::Vigilance)
            .rarity(Rarity::Uncommon)
            .oracle("Flying, vigilance"),
        creature("Giant Spider", "{3}{G}", "Spider", "2", "4")
            .keyword(Keyword::Reach)
            .oracle("Reach"),
        creature("Boggart Brute", "{2}{R}", "Goblin Warrior", "3", "2")
            .keyword(Keyword::Menace)
            .oracle("Menace"),
        creature("Severed Legion", "{1}{B}{B}", "Zombie", "2", "2")
            .keyword(Keyword::Fear)
            .oracle("Fear"),
        creature("Bladetusk Boar", "{3}{R}", "Boar", "3", "2")
            .keyword(Keyword::Intimidate)
            .oracle("Intimidate"),
        creature("Bog Wraith", "{3}{B}", "Wraith", "3", "3")
            .keyword(Keyword::Landwalk(BasicLandType::Swamp))
            .oracle("Swampwalk"),
        creature("Raging Goblin", "{R}", "Goblin Berserker", "1", "1")
            .keyword(Keyword::Haste)
            .oracle("Haste"),
        creature("Wall of Stone", "{1}{R}{R}", "Wall", "0", "8")
            .keyword(Keyword::Defender)
            .rarity(Rarity::Uncommon)
            .oracle("Defender"),
        creature("Troll Ascetic", "{1}{G}{G}", "Troll Shaman", "3", "2")
            .keyword(Keyword::Hexproof)
            .rarity(Rarity::Rare)
            .oracle("Hexproof"),
        creature("Blastoderm", "{2}{G}{G}", "Beast", "5", "5")
            .keyword(Keyword::Shroud)
            .rarity(Rarity::Rare)
            .oracle("Shroud"),
        creature("White Knight", "{W}{W}", "Human Knight", "2", "2")
            .keyword(Keyword::Protection(Color::Black))
            .rarity(Rarity::Uncommon)
            .oracle("Protection from black"),
        creature("Karplusan Yeti", "{3}{R}{R}", "Yeti", "3", "3")
            .keyword(Keyword::Protection(Color::Red))
            .oracle("Protection from red"),
        creature("Vampire Nighthawk", "{1}{B}{B}", "Vampire Shaman", "2", "3")
            .keyword(Keyword::Flying)
            .keyword(Keyword::Lifelink)
            .rarity(Rarity::Uncommon)
            .oracle("Flying, lifelink"),
        CardTemplate::builder("Ornithopter")
            .cost("{0}")
            .type_line("Artifact Creature — Thopter")
            .stats("0", "2")
            .keyword(Keyword::Flying)
            .rarity(Rarity::Uncommon)
            .oracle("Flying"),
        CardTemplate::builder("Yotian Soldier")
            .cost("{3}")
            .type_line("Artifact Creature — Soldier")
            .stats("1", "4")
            .keyword(Keyword::Vigilance)
            .oracle("Vigilance"),
        creature("Llanowar Elves", "{G}", "Elf Druid", "1", "1")
            .oracle("{T}: Add {G}.")
            .ability(AbilityDef::tap_for(ManaProduction::single(ManaType::Green))),
        creature("Birds of Paradise", "{G}", "Bird", "0", "1")
            .keyword(Keyword::Flying)
            .rarity(Rarity::Rare)
            .oracle("Flying\n{T}: Add one mana of any color.")
            .ability(AbilityDef::tap_for(ManaProduction::AnyColor)),
        creature("Prodigal Sorcerer", "{2}{U}", "Human Wizard", "1", "1")
            .oracle("{T}: Prodigal Sorcerer deals 1 damage to any target.")
            .ability(ping(AbilityCost::tap())),
        creature("Mogg Fanatic", "{R}", "Goblin", "1", "1")
            .oracle("Sacrifice Mogg Fanatic: It deals 1 damage to any target.")
            .ability(ping(AbilityCost::sacrifice())),
        creature("Shivan Dragon", "{4}{R}{R}", "Dragon", "5", "5")
            .keyword(Keyword::Flying)
            .rarity(Rarity::Rare)
            .oracle("Flying\n{R}: Shivan Dragon gets +1/+0 until end of turn.")
            .ability(AbilityDef::new(
                AbilityCost::mana(ManaCost {
                    red: 1,
                    ..ManaCost::ZERO
                }),
                Effect::PumpSelf {
                    power: 1,
                    toughness: 0,
                },
            )),
    ]
}

fn spells() -> Vec<CardTemplateBuilder> {
    vec![
        spell("Shock", "{R}", "Instant", Effect::damage(2), "Shock deals 2 damage to any target."),
        spell(
            "Lightning Bolt",
            "{R}",
            "Instant",
            Effect::damage(3),
            "Lightning Bolt deals 3 damage to any target.",
        ),
        spell(
            "Lightning Blast",
            "{3}{R}",
            "Instant",
            Effect::damage(4),
            "Lightning Blast deals 4 damage to any target.",
        ),
        spell(
            "Fireball",
            "{X}{R}",
            "Sorcery",
            Effect::damage_x(),
            "Fireball deals X damage to any target.",
        ),
        spell(
            "Lava Axe",
            "{4}{R}",
            "Sorcery",
            Effect::DealDamage {
                amount: Amount::Fixed(5),
                target: TargetKind::Player,
            },
            "Lava Axe deals 5 damage to target player.",
        ),
        spell(
            "Giant Growth",
            "{G}",
            "Instant",
            Effect::pump(3, 3),
            "Target creature gets +3/+3 until end of turn.",
        ),
        spell(
            "Battlegrowth",
            "{G}",
            "Instant",
            Effect::AddCounters {
                counter: super::instance::CounterKind::PlusOnePlusOne,
                count: 1,
            },
            "Put a +1/+1 counter on target creature.",
        ),
        spell(
            "Counterspell",
            "{U}{U}",
            "Instant",
            Effect::CounterSpell,
            "Counter target spell.",
        )
        .rarity(Rarity::Uncommon),
        spell(
            "Terror",
            "{1}{B}",
            "Instant",
            Effect::destroy(&[TargetRestriction::NonArtifact, TargetRestriction::NonBlack]),
            "Destroy target nonartifact, nonblack creature. It can't be regenerated.",
        ),
        spell(
            "Divination",
            "{2}{U}",
            "Sorcery",
            Effect::DrawCards { count: 2 },
            "Draw two cards.",
        ),
        spell(
            "Ancestral Recall",
            "{U}",
            "Instant",
            Effect::TargetPlayerDraws { count: 3 },
            "Target player draws three cards.",
        )
        .rarity(Rarity::Rare),
        spell(
            "Stream of Life",
            "{X}{G}",
            "Sorcery",
            Effect::GainLife { amount: Amount::X },
            "Target player gains X life.",
        ),
        spell(
            "Rampant Growth",
            "{1}{G}",
            "Sorcery",
            Effect::SearchBasicLand,
            "Search your library for a basic land card, put that card onto the battlefield tapped, then shuffle.",
        ),
        spell(
            "Raise the Alarm",
            "{1}{W}",
            "Instant",
            Effect::CreateTokens {
                token: SOLDIER_TOKEN.to_string(),
                count: 2,
            },
            "Create two 1/1 white Soldier creature tokens.",
        ),
        spell(
            "Diabolic Edict",
            "{1}{B}",
            "Instant",
            Effect::TargetPlayerSacrifices {
                card_type: CardType::Creature,
            },
            "Target player sacrifices a creature.",
        ),
        CardTemplate::builder("Holy Strength")
            .cost("{W}")
            .type_line("Enchantment — Aura")
            .aura(1, 2)
            .oracle("Enchant creature\nEnchanted creature gets +1/+2."),
        CardTemplate::builder("Sol Ring")
            .cost("{1}")
            .type_line("Artifact")
            .rarity(Rarity::Uncommon)
            .oracle("{T}: Add {C}{C}.")
            .ability(AbilityDef::tap_for(ManaProduction::Fixed {
                mana: ManaType::Colorless,
                amount: 2,
            })),
    ]
}

fn tokens() -> Vec<CardTemplateBuilder> {
    vec![CardTemplate::builder(SOLDIER_TOKEN)
        .type_line("Token Creature — Soldier")
        .stats("1", "1")
        .colors(&[Color::White])
        .rarity(Rarity::Special)
        .scryfall_id("token-soldier")]
}

impl CardCatalog {
    /// The built-in core set.
    #[must_use]
    pub fn core_set() -> Self {
        let mut catalog = CardCatalog::new();
        for builder in lands().into_iter().chain(creatures()).chain(spells()).chain(tokens()) {
            if let Err(err) = catalog.register(builder) {
                warn!("skipping core set card: {}", err);
            }
        }
        catalog
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::abilities::AbilityEffect;
    use crate::cards::{has_flying, has_vigilance};

    #[test]
    fn test_core_set_is_complete() {
        let catalog = CardCatalog::core_set();
        let expected = lands().len() + creatures().len() + spells().len() + tokens().len();
        assert_eq!(catalog.len(), expected);
    }

    #[test]
    fn test_serra_angel() {
        let catalog = CardCatalog::core_set();
        let angel = catalog.get_by_name("Serra Angel").unwrap();
        assert!(has_flying(angel));
        assert!(has_vigilance(angel));
        assert_eq!(angel.base_power(), 4);
        assert_eq!(angel.colors.as_slice(), &[Color::White]);
    }

    #[test]
    fn test_pain_land_abilities() {
        let catalog = CardCatalog::core_set();
        let forge = catalog.get_by_name("Battlefield Forge").unwrap();
        assert_eq!(forge.abilities.len(), 2);
        assert!(forge.colors.is_empty());
        match &forge.abilities[1].effect {
            AbilityEffect::AddMana { production, damage } => {
                assert!(production.allows(Color::Red));
                assert!(production.allows(Color::White));
                assert!(!production.allows(Color::Blue));
                assert_eq!(*damage, 1);
            }
            other => panic!("unexpected effect {:?}", other),
        }
    }

    #[test]
    fn test_soldier_token_is_white() {
        let catalog = CardCatalog::core_set();
        let soldier = catalog.get_by_name(SOLDIER_TOKEN).unwrap();
        assert!(soldier.types.token);
        assert!(soldier.types.is_creature());
        assert_eq!(soldier.colors.as_slice(), &[Color::White]);
    }

    #[test]
    fn test_fireball_uses_x() {
        let catalog = CardCatalog::core_set();
        let fireball = catalog.get_by_name("Fireball").unwrap();
        assert!(fireball.cost.has_x());
        assert_eq!(fireball.cmc, 1);
        assert!(fireball.effect.as_ref().unwrap().uses_x());
    }
}
