use avl_hash::{logger, CollisionPolicy, HashTable, HashTableError};

const CLIENTS: [(&str, u64); 9] = [
    ("Shubham", 10002),
    ("Shubham", 10003),
    ("Shubham", 10004),
    ("Advait", 10005),
    ("Kaustubh", 10006),
    ("Swaraj", 10007),
    ("Anushka", 10004),
    ("PICT", 10001),
    ("PICT", 10001),
];

fn print_table(table: &HashTable) {
    println!("{:>5} {:>20} {:>20} {:>8}", "Slot", "Client Name", "Telephone", "Chain");
    for (index, slot) in table.display() {
        match slot {
            Some(record) => println!(
                "{:>5} {:>20} {:>20} {:>8}",
                index,
                record.name(),
                record.telephone(),
                record.chain().map_or(-1, |chain| chain as i64)
            ),
            None => println!("{:>5} {:>20} {:>20} {:>8}", index, "----", 0, -1),
        }
    }
}

fn build(policy: CollisionPolicy) -> Result<HashTable, HashTableError> {
    let mut table = HashTable::new(10)?;
    for (name, telephone) in CLIENTS {
        table.insert(name, telephone, policy)?;
    }
    Ok(table)
}

fn main() -> Result<(), HashTableError> {
    logger::initialize_logger();

    let names: Vec<&str> = CLIENTS.iter().map(|(name, _)| *name).collect();
    for policy in [
        CollisionPolicy::WithoutReplacement,
        CollisionPolicy::WithReplacement,
    ] {
        let table = build(policy)?;
        println!("{:?}", policy);
        print_table(&table);
        for name in ["Shubham", "PICT", "Swaraj"] {
            let lookup = table.lookup(name);
            match lookup.record {
                Some(record) => println!(
                    "{} -> {} ({} comparisons)",
                    name,
                    record.telephone(),
                    lookup.comparisons
                ),
                None => println!("{} not found ({} comparisons)", name, lookup.comparisons),
            }
        }
        println!(
            "Total comparisons: {}\n",
            table.total_comparisons(names.iter().copied())
        );
    }

    let mut full = build(CollisionPolicy::WithReplacement)?;
    full.insert_with_replacement("Overflow", 10010)?;
    if let Err(err) = full.insert_with_replacement("Overflow", 10011) {
        println!("{}", err);
    }
    Ok(())
}
