//! Randomized selection sequences.

mod common;

use futures::executor::block_on;
use proptest::prelude::*;

use common::{recording, source};
use option_tree::{CascadeSelector, SelectorConfig, SELECT_ALL_ID};

fn mounted() -> (CascadeSelector, common::Emissions) {
    let (mut selector, emissions) = recording(SelectorConfig::new("residence").multiple());
    block_on(selector.mount(&source(), None));
    (selector, emissions)
}

/// Every concrete option of level k+1 hangs under a selected option of level k
fn assert_children_follow_parents(selector: &CascadeSelector) {
    let map = selector.selection();
    for pair in selector.levels().windows(2) {
        let parents = map.values(pair[0].category());
        for child in pair[1].concrete() {
            let parent = child.parent_value.as_deref().unwrap_or_default();
            assert!(parents.contains(&parent), "{} is orphaned", child.value);
        }
    }
}

proptest! {
    #[test]
    fn selection_never_keeps_deeper_categories(
        steps in prop::collection::vec((any::<u8>(), prop::collection::vec(any::<u8>(), 0..4)), 1..16)
    ) {
        let source = source();
        let (mut selector, emissions) = mounted();

        for (level_pick, option_picks) in steps {
            let depth = selector.levels().len();
            prop_assume!(depth > 0);
            let level = level_pick as usize % depth;
            let options = selector.levels()[level].options().to_vec();
            let picked: Vec<i64> = option_picks.iter().map(|p| options[*p as usize % options.len()].id).collect();

            let deeper: Vec<String> = selector.levels()[level + 1..]
                .iter()
                .map(|l| l.category().to_string())
                .collect();

            block_on(selector.select_and_load(&source, level, &picked)).unwrap();

            let emitted = emissions.borrow().last().cloned().unwrap();
            prop_assert!(emitted.len() <= level + 1);
            for category in &deeper {
                prop_assert!(!emitted.contains(category));
            }
            prop_assert!(selector.levels().len() <= level + 2);
            assert_children_follow_parents(&selector);
        }
    }

    #[test]
    fn select_all_is_idempotent_and_complete(level_picks in prop::collection::vec(any::<u8>(), 1..4)) {
        let source = source();
        let (mut selector, _) = mounted();

        for pick in level_picks {
            let level = pick as usize % selector.levels().len();
            let everything: Vec<String> = selector.levels()[level]
                .concrete()
                .iter()
                .map(|o| o.value.clone())
                .collect();
            let category = selector.levels()[level].category().to_string();

            block_on(selector.select_and_load(&source, level, &[SELECT_ALL_ID])).unwrap();
            let once = selector.selection();
            block_on(selector.select_and_load(&source, level, &[SELECT_ALL_ID])).unwrap();

            prop_assert_eq!(selector.selection(), once.clone());
            prop_assert_eq!(once.values(&category), everything.iter().map(String::as_str).collect::<Vec<_>>());
        }
    }
}
