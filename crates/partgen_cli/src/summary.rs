use part_generator::{GeneratedPart, GenerationResult, SkippedRow, KNOWN_PROPERTIES};
use termtree::Tree;

/// One node per row, in row order. Each generated part lists its known properties, whether set
/// by the row or inherited from the template.
pub(crate) fn build_summary_tree(result: &GenerationResult) -> Tree<String> {
    let mut row_nodes: Vec<(usize, Tree<String>)> = vec![];

    for GeneratedPart { row, template_name, symbol } in result.parts.iter() {
        let mut part_node = Tree::new(format!("Row {}: {} (from {})", row, symbol.entry_name(), template_name));

        for property in symbol.properties().filter(|property| KNOWN_PROPERTIES.contains(&property.key())) {
            let visibility = if property.is_hidden() { " (hidden)" } else { "" };
            part_node.leaves.push(Tree::new(format!("{}: '{}'{}", property.key(), property.value(), visibility)));
        }

        row_nodes.push((*row, part_node));
    }

    for SkippedRow { row, reason } in result.skipped.iter() {
        row_nodes.push((*row, Tree::new(format!("Row {}: ERROR: Skipped - {}.", row, reason))));
    }

    row_nodes.sort_by_key(|(row, _)| *row);

    let mut tree = Tree::new("Generation Result".to_string());
    tree.leaves.extend(row_nodes.into_iter().map(|(_, node)| node));
    tree
}
