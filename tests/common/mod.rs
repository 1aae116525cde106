#![allow(dead_code)]

use std::fs;
use std::fmt::Display;
use std::path::{Path, PathBuf};

use sortbench::{Key, ScapegoatTree, SearchTree};

/// Insertion order from the bushy eight-node example.
pub const BUSHY_KEYS: [Key; 8] = [50, 25, 75, 10, 30, 60, 80, 5];

pub fn unbalanced_from(keys: &[Key]) -> SearchTree {
    let mut tree = SearchTree::new();
    for &key in keys {
        tree.insert(key).expect("distinct keys insert");
    }
    tree
}

pub fn scapegoat_from(keys: &[Key]) -> ScapegoatTree {
    let mut tree = ScapegoatTree::new();
    for &key in keys {
        tree.add(key).expect("distinct keys insert");
    }
    tree
}

/// Golden dumps live in `tests/snapshots/<name>.dump`.
fn dump_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("snapshots")
        .join(name)
        .with_extension("dump")
}

/// Compare a tree's pre-order dump against its golden file, reporting the
/// first diverging node line. `SORTBENCH_UPDATE_SNAPSHOTS=1` rewrites it.
pub fn assert_dump_matches(name: &str, tree: &impl Display) {
    let actual = tree.to_string();
    let path = dump_path(name);
    if std::env::var_os("SORTBENCH_UPDATE_SNAPSHOTS").is_some() {
        fs::write(&path, &actual).expect("write golden dump");
        return;
    }

    let expected = fs::read_to_string(&path)
        .unwrap_or_else(|err| panic!("golden dump {} unreadable: {}", path.display(), err));
    let mut expected_lines = expected.lines();
    let mut actual_lines = actual.lines();
    for line in 1.. {
        match (expected_lines.next(), actual_lines.next()) {
            (None, None) => return,
            (want, got) if want == got => continue,
            (want, got) => panic!(
                "{} diverges at node line {}\n  golden: {}\n  actual: {}\nfull dump:\n{}",
                path.display(),
                line,
                want.unwrap_or("<end of dump>"),
                got.unwrap_or("<end of dump>"),
                actual
            ),
        }
    }
}
