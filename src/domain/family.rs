//! Rendering of a node's family line: `Bob had Carl, Dana and Eve.`

/// Text used for a node without children.
pub const NO_OFFSPRING: &str = "no offspring.";

/// Joins children as `A, B and C.`, `A and B.`, `A.`; no children gives
/// [`NO_OFFSPRING`].
pub fn offspring_list<S: AsRef<str>>(children: &[S]) -> String {
    let count = children.len();
    if count == 0 {
        return NO_OFFSPRING.to_string();
    }
    let mut line = String::new();
    for (i, child) in children.iter().enumerate() {
        line.push_str(child.as_ref());
        if i + 2 < count {
            line.push_str(", ");
        } else if i + 2 == count {
            line.push_str(" and ");
        } else {
            line.push('.');
        }
    }
    line
}

/// `<name> had <offspring list>` without a trailing newline.
pub fn family_line<S: AsRef<str>>(name: &str, children: &[S]) -> String {
    format!("{} had {}", name, offspring_list(children))
}
