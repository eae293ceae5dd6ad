//! Property-based tests for the mixture model and identifier builder.
//!
//! Random trees check that key invariants hold regardless of sibling order,
//! nesting depth, or which fields happen to be present.

use mixfile_tools::{MInChIBuilder, MInChIKeys, MixfileComponent, Mixture, MixtureNormalizer, UnitCatalog};
use proptest::prelude::*;
use std::collections::HashSet;

const INCHIS: &[&str] = &[
    "InChI=1S/H2O/h1H2",
    "InChI=1S/C2H6O/c1-2-3/h3H,2H2,1H3",
    "InChI=1S/CH4O/c1-2/h2H,1H3",
    "InChI=1S/ClH.Na/h1H;/q;+1/p-1",
];
const UNITS: &[&str] = &["%", "g", "mL", "mol", "mM", "w/w%", "v/v%", "ppm", "furlong"];

fn leaf() -> impl Strategy<Value = MixfileComponent> {
    (
        prop::option::of(prop::sample::select(vec!["a", "b", "c"])),
        prop::option::of(prop::sample::select(INCHIS.to_vec())),
        prop::option::of((0.0f64..100.0, prop::sample::select(UNITS.to_vec()))),
        prop::option::of((1u8..10, 1u8..10)),
    )
        .prop_map(|(name, inchi, quantity, ratio)| {
            let mut comp = MixfileComponent {
                name: name.map(str::to_string),
                inchi: inchi.map(str::to_string),
                ..MixfileComponent::default()
            };
            if let Some((value, units)) = quantity {
                comp = comp.with_quantity(value, units);
            }
            if let Some((num, den)) = ratio {
                comp = comp.with_ratio(f64::from(num), f64::from(den));
            }
            comp
        })
}

fn tree() -> impl Strategy<Value = MixfileComponent> {
    leaf().prop_recursive(4, 32, 4, |inner| {
        (leaf(), prop::collection::vec(inner, 0..4)).prop_map(|(mut comp, contents)| {
            comp.contents = contents;
            comp
        })
    })
}

/// Reverse and rotate every sibling list
fn permute(comp: &mut MixfileComponent, rotation: usize) {
    comp.contents.reverse();
    if !comp.contents.is_empty() {
        let by = rotation % comp.contents.len();
        comp.contents.rotate_left(by);
    }
    for child in &mut comp.contents {
        permute(child, rotation + 1);
    }
}

fn count(comp: &MixfileComponent) -> usize {
    1 + comp.contents.iter().map(count).sum::<usize>()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn minchi_ignores_sibling_order(root in tree(), rotation in 0usize..5) {
        let original = Mixture::from_root(root.clone());
        let mut shuffled_root = root;
        permute(&mut shuffled_root, rotation);
        let shuffled = Mixture::from_root(shuffled_root);

        let builder = MInChIBuilder::new();
        prop_assert_eq!(builder.formulate(&original), builder.formulate(&shuffled));
    }

    #[test]
    fn origins_cover_every_component(root in tree()) {
        let mixture = Mixture::from_root(root);
        let origins = mixture.get_origins();
        prop_assert_eq!(origins.len(), count(mixture.root()));
        for origin in &origins {
            prop_assert!(mixture.get_component(origin).is_some());
        }
        let unique: HashSet<_> = origins.iter().collect();
        prop_assert_eq!(unique.len(), origins.len());
    }

    #[test]
    fn delete_removes_exactly_one(root in tree(), pick in any::<prop::sample::Index>()) {
        let mut mixture = Mixture::from_root(root);
        let origins = mixture.get_origins();
        let before = origins.len();
        let origin = pick.get(&origins).clone();
        let deleted = mixture.delete_component(&origin).unwrap();
        prop_assert_eq!(deleted, !origin.is_empty());
        let expected = if deleted { before - 1 } else { before };
        prop_assert_eq!(mixture.get_origins().len(), expected);
    }

    #[test]
    fn normalizer_is_total_and_stable(root in tree()) {
        let mixture = Mixture::from_root(root);
        let normalizer = MixtureNormalizer::new();
        let notes = normalizer.analyse(&mixture);
        prop_assert_eq!(notes.len(), mixture.get_origins().len());
        prop_assert_eq!(notes, normalizer.analyse(&mixture));
    }

    #[test]
    fn formulate_does_not_touch_the_mixture(root in tree()) {
        let mixture = Mixture::from_root(root);
        let before = mixture.clone();
        let _ = MInChIBuilder::new().formulate(&mixture);
        prop_assert_eq!(mixture, before);
    }

    #[test]
    fn json_round_trip(root in tree()) {
        let mixture = Mixture::from_root(root);
        let reparsed = Mixture::from_json(&mixture.to_json().unwrap()).unwrap();
        prop_assert_eq!(reparsed, mixture);
    }

    #[test]
    fn arbitrary_text_never_panics(s in "\\PC{0,200}") {
        let _ = Mixture::from_json(&s);
    }

    #[test]
    fn unit_scaling_inverts(value in -1e6f64..1e6) {
        for entry in UnitCatalog::global().entries() {
            if let Some((_, scaled)) = entry.to_minchi(&[value]) {
                let back = entry.from_minchi(&scaled).unwrap();
                prop_assert!((back[0] - value).abs() <= 1e-9 * value.abs().max(1.0));
            }
        }
    }
}

#[test]
fn short_keys_do_not_collide() {
    let keys: HashSet<String> = (0..20_000)
        .map(|i| MInChIKeys::derive(&format!("C{i}H{}O/h{i}", i % 97)).short)
        .collect();
    assert_eq!(keys.len(), 20_000);
}

#[test]
fn keys_are_stable_across_calls() {
    let first = MInChIKeys::derive("C2H6O/c1-2-3/h3H,2H2,1H3&H2O/h1H2");
    for _ in 0..10 {
        assert_eq!(MInChIKeys::derive("C2H6O/c1-2-3/h3H,2H2,1H3&H2O/h1H2"), first);
    }
}
