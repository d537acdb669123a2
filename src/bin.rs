use avl_set::AvlTreeSet;

pub fn main() {
    let mut set = (1..10_000 as u32).rev().collect::<AvlTreeSet<_>>();

    let mut cursor = set.cursor_end();
    let mut walked = 0;

    cursor.move_prev();

    while cursor.get().is_some() {
        walked += 1;
        cursor.move_prev();
    }

    assert_eq!(walked, set.len());

    for i in (1..10_000).step_by(2) {
        set.take(&i);
    }

    for i in 1..10_000 {
        set.take(&i);
    }

    assert!(set.is_empty());
}
