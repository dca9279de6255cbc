use bullets_sim::renderer_engine::{build_indices, INDICES_PER_BULLET};

#[test]
fn test_indices_for_three_bullets() {
    assert_eq!(
        build_indices(3),
        vec![0, 1, 2, 2, 3, 0, 4, 5, 6, 6, 7, 4, 8, 9, 10, 10, 11, 8]
    );
}

#[test]
fn test_indices_per_bullet_pattern() {
    let count = 1000;
    let indices = build_indices(count);
    assert_eq!(indices.len(), count * INDICES_PER_BULLET);

    for (i, quad) in indices.chunks_exact(INDICES_PER_BULLET).enumerate() {
        let b = (4 * i) as u16;
        assert_eq!(quad, &[b, b + 1, b + 2, b + 2, b + 3, b]);
    }
}

#[test]
fn test_every_vertex_is_referenced() {
    let count = 17;
    let indices = build_indices(count);
    let mut seen = vec![false; count * 4];
    for &i in &indices {
        seen[i as usize] = true;
    }
    assert!(seen.iter().all(|&s| s));
}
