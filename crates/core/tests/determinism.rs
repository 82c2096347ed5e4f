use dungeon_core::{MazeGenerator, generate_dungeon};

#[test]
fn test_determinism_identical_seeds_produce_same_layout() {
    let a = generate_dungeon(12_345, (4, 4)).expect("generation failed");
    let b = generate_dungeon(12_345, (4, 4)).expect("generation failed");

    assert_eq!(
        a.layout_hash(),
        b.layout_hash(),
        "Identical seeds must produce identical layouts"
    );
    assert_eq!(a.to_string(), b.to_string());
    assert_eq!(a.starting_point(), b.starting_point());
    assert_eq!(a.ending_point(), b.ending_point());
    assert_eq!(a.treasure_point(), b.treasure_point());
    assert_eq!(a.ensured_open_walls(), b.ensured_open_walls());
}

#[test]
fn test_determinism_different_seeds_produce_different_layouts() {
    let a = generate_dungeon(123, (4, 4)).expect("generation failed");
    let b = generate_dungeon(456, (4, 4)).expect("generation failed");

    assert_ne!(
        a.layout_hash(),
        b.layout_hash(),
        "Different seeds should probably produce different layouts"
    );
}

#[test]
fn test_wall_probability_changes_layout_for_same_seed() {
    let sparse = MazeGenerator::new(99, (5, 5))
        .wall_probability(0.0)
        .generate()
        .expect("generation failed");
    let dense = MazeGenerator::new(99, (5, 5))
        .wall_probability(1.0)
        .generate()
        .expect("generation failed");

    assert_eq!(sparse.starting_point(), dense.starting_point());
    assert_ne!(sparse.layout_hash(), dense.layout_hash());
}
