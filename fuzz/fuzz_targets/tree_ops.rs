#![no_main]

use libfuzzer_sys::fuzz_target;

use grove::{
    infra::{arbitrary::TreeOp, testing::check_tree_consistency},
    Tree,
};

fuzz_target!(|ops: Vec<TreeOp>| {
    let mut tree = Tree::new(0);

    for op in ops {
        let _ = op.apply(&mut tree);
        check_tree_consistency(&tree)
            .as_ref()
            .map_err(ToString::to_string)
            .unwrap();
    }
});
