use avl_hash::{logger, AvlTree};
use log::info;

fn main() {
    logger::initialize_logger();

    let mut tree = AvlTree::new();
    tree.insert(1, String::from("one"));
    tree.insert(2, String::from("two"));
    tree.insert(3, String::from("three"));
    tree.insert(4, String::from("four"));
    tree.insert(5, String::from("five"));
    tree.insert(6, String::from("six"));
    tree.insert(6, String::from("SIX"));
    info!("Inserted {} keys, height {}", tree.len(), tree.height());

    println!("In-order traversal: {:?}", tree.inorder());
    println!("Level-order traversal:");
    tree.traverse_level_order(|k, v| {
        println!("Key: {}, Value: {}", k, v);
    });

    match tree.search(&6) {
        Some(value) => println!("Key found, value is {}", value),
        None => println!("Key not found"),
    }

    tree.delete(&4);
    if tree.search(&4).is_none() {
        println!("Key 4 deleted");
    }
    println!("In-order traversal: {:?}", tree.inorder());
    println!("Level-order traversal: {:?}", tree.level_order());
}
