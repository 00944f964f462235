//! Built-in prestige class prerequisites.

use saga_core::prerequisite::{DarkSideThreshold, Expression};
use saga_core::traits::ClassDefinition;

/// Force talent trees counted by Force Adept.
const FORCE_TREES: &[&str] = &["Alter", "Control", "Sense", "Dark Side", "Light Side"];

fn prestige(id: &str, name: &str, prerequisite: Expression) -> ClassDefinition {
    ClassDefinition {
        id: id.into(),
        name: name.to_string(),
        prestige: true,
        prerequisite: Some(prerequisite.into()),
    }
}

/// The core prestige classes with structured prerequisites.
pub fn prestige_classes() -> Vec<ClassDefinition> {
    vec![
        prestige(
            "ace-pilot",
            "Ace Pilot",
            Expression::all(vec![
                Expression::level(7),
                Expression::trained("Pilot"),
                Expression::feat("Vehicular Combat"),
            ]),
        ),
        prestige(
            "bounty-hunter",
            "Bounty Hunter",
            Expression::all(vec![
                Expression::level(7),
                Expression::trained("Survival"),
                Expression::talents_from(&["Awareness"], 2),
            ]),
        ),
        prestige(
            "crime-lord",
            "Crime Lord",
            Expression::all(vec![
                Expression::level(7),
                Expression::trained("Deception"),
                Expression::trained("Persuasion"),
                Expression::talents_from(&["Fortune", "Lineage", "Misfortune"], 1),
            ]),
        ),
        prestige(
            "elite-trooper",
            "Elite Trooper",
            Expression::all(vec![
                Expression::bab(7),
                Expression::feat("Armor Proficiency (Medium)"),
                Expression::feat("Martial Arts I"),
                Expression::any(vec![
                    Expression::feat("Point-Blank Shot"),
                    Expression::feat("Flurry"),
                ]),
                Expression::talents_from(&["Armor Specialist", "Commando", "Weapon Specialist"], 1),
            ]),
        ),
        prestige(
            "force-adept",
            "Force Adept",
            Expression::all(vec![
                Expression::level(12),
                Expression::trained("Use the Force"),
                Expression::feat("Force Sensitivity"),
                Expression::talents_from(FORCE_TREES, 3),
            ]),
        ),
        prestige(
            "gunslinger",
            "Gunslinger",
            Expression::all(vec![
                Expression::level(7),
                Expression::feat("Point-Blank Shot"),
                Expression::feat("Precise Shot"),
                Expression::feat("Quick Draw"),
                Expression::feat("Weapon Proficiency (Pistols)"),
            ]),
        ),
        prestige(
            "jedi-knight",
            "Jedi Knight",
            Expression::all(vec![
                Expression::bab(7),
                Expression::trained("Use the Force"),
                Expression::feat("Force Sensitivity"),
                Expression::feat("Weapon Proficiency (Lightsabers)"),
            ]),
        ),
        prestige(
            "officer",
            "Officer",
            Expression::all(vec![
                Expression::level(7),
                Expression::trained("Knowledge (Tactics)"),
                Expression::talents_from(&["Leadership", "Commando", "Veteran"], 1),
            ]),
        ),
        prestige(
            "sith-apprentice",
            "Sith Apprentice",
            Expression::all(vec![
                Expression::trained("Use the Force"),
                Expression::feat("Force Sensitivity"),
                Expression::feat("Weapon Proficiency (Lightsabers)"),
                Expression::dark_side(DarkSideThreshold::EqualsWisdom),
            ]),
        ),
        prestige(
            "independent-droid",
            "Independent Droid",
            Expression::all(vec![
                Expression::level(7),
                Expression::trained("Use Computer"),
                Expression::droid_systems(&["Heuristic Processor"]),
            ]),
        ),
    ]
}
