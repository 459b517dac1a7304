#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use option_tree::{CascadeSelector, MemorySource, OptionNode, SelectionMap, SelectorConfig};

/// residence → etage → chambre fixture
pub fn foyer_nodes() -> Vec<OptionNode> {
    vec![
        OptionNode::new(1, "residence", "12", "Les Tilleuls").with_label_category("Résidence"),
        OptionNode::new(2, "residence", "7", "Les Érables").with_label_category("Résidence"),
        OptionNode::new(3, "residence", "15", "Annexe").with_label_category("Résidence"),
        OptionNode::new(10, "etage", "1", "Étage 1").with_parent("12").with_label_category("Étage"),
        OptionNode::new(11, "etage", "2", "Étage 2").with_parent("12").with_label_category("Étage"),
        OptionNode::new(12, "etage", "7-1", "Rez-de-chaussée").with_parent("7").with_label_category("Étage"),
        OptionNode::new(20, "chambre", "101", "Chambre 101").with_parent("1").with_label_category("Chambre"),
        OptionNode::new(21, "chambre", "204", "Chambre 204").with_parent("2").with_label_category("Chambre"),
        OptionNode::new(22, "chambre", "205", "Chambre 205").with_parent("2").with_label_category("Chambre"),
    ]
}

pub fn source() -> MemorySource {
    MemorySource::new(foyer_nodes())
}

pub type Emissions = Rc<RefCell<Vec<SelectionMap>>>;

/// Selector with a listener recording every emission
pub fn recording(config: SelectorConfig) -> (CascadeSelector, Emissions) {
    let emissions: Emissions = Rc::new(RefCell::new(Vec::new()));
    let sink = emissions.clone();
    let selector = CascadeSelector::new(config).on_change(move |map| sink.borrow_mut().push(map.clone()));
    (selector, emissions)
}

/// Id of the option with `value` in level `index`
pub fn id_of(selector: &CascadeSelector, index: usize, value: &str) -> i64 {
    selector.levels()[index]
        .concrete()
        .iter()
        .find(|o| o.value == value)
        .map(|o| o.id)
        .unwrap_or_else(|| panic!("no option {} in level {}", value, index))
}
