use bullets_sim::physic_engine::{BulletCollection, BulletShape, Vec2};

// ==================================
// 1. set_bullet
// ==================================

#[test]
fn test_set_bullet_applies_shape_scale() {
    let mut bullets = BulletCollection::new(3);
    bullets.set_bullet(
        0,
        0.0,
        0.0,
        2.0,
        4.0,
        0.0,
        0.0,
        0.0,
        BulletShape::Oval,
        [0; 4],
    );
    bullets.set_bullet(
        1,
        0.0,
        0.0,
        2.0,
        4.0,
        0.0,
        0.0,
        0.0,
        BulletShape::Dot,
        [0; 4],
    );
    bullets.set_bullet(
        2,
        0.0,
        0.0,
        2.0,
        4.0,
        0.0,
        0.0,
        0.0,
        BulletShape::Hexagon,
        [0; 4],
    );

    assert_eq!(bullets.dimensions()[0], Vec2::new(1.0, 4.0));
    assert_eq!(bullets.dimensions()[1], Vec2::new(1.0, 2.0));
    assert_eq!(bullets.dimensions()[2], Vec2::new(2.0, 4.0));
}

#[test]
fn test_set_bullet_writes_shape_uvs() {
    let mut bullets = BulletCollection::new(1);
    bullets.set_bullet(
        0,
        0.0,
        0.0,
        1.0,
        1.0,
        0.0,
        0.0,
        0.0,
        BulletShape::Circle,
        [0; 4],
    );

    let inset = 0.5 / 512.0;
    let expected = [
        0.5 + inset,
        0.75 + inset,
        0.75 - inset,
        0.75 + inset,
        0.75 - inset,
        1.0 - inset,
        0.5 + inset,
        1.0 - inset,
    ];
    assert_eq!(bullets.texture_coordinates()[0], expected);
    assert_eq!(bullets.texture_coordinates()[0], BulletShape::Circle.tex_coords());
}

#[test]
fn test_color_is_replicated_on_four_corners() {
    let mut bullets = BulletCollection::new(1);
    bullets.set_bullet(
        0,
        1.0,
        1.0,
        1.0,
        1.0,
        0.3,
        0.0,
        0.0,
        BulletShape::Triangle,
        [255, 0, 0, 128],
    );

    let expected = [255, 0, 0, 128, 255, 0, 0, 128, 255, 0, 0, 128, 255, 0, 0, 128];
    assert_eq!(bullets.vertex_colors()[0], expected);

    bullets.update_positions();
    assert_eq!(bullets.vertex_colors()[0], expected);
}

#[test]
#[should_panic]
fn test_set_bullet_out_of_range_panics() {
    let mut bullets = BulletCollection::new(2);
    bullets.set_bullet(
        2,
        0.0,
        0.0,
        1.0,
        1.0,
        0.0,
        0.0,
        0.0,
        BulletShape::Dot,
        [0; 4],
    );
}

// ==================================
// 2. update_positions
// ==================================

#[test]
fn test_corners_of_axis_aligned_quad() {
    let mut bullets = BulletCollection::new(1);
    bullets.set_bullet(
        0,
        2.0,
        3.0,
        1.0,
        1.0,
        0.0,
        0.0,
        0.0,
        BulletShape::Circle,
        [0; 4],
    );
    bullets.update_positions();

    // bas-gauche, bas-droite, haut-droite, haut-gauche
    assert_eq!(
        bullets.vertex_positions()[0],
        [1.0, 2.0, 3.0, 2.0, 3.0, 4.0, 1.0, 4.0]
    );
}

#[test]
fn test_update_positions_is_idempotent() {
    let mut bullets = BulletCollection::new(64);
    for i in 0..64 {
        let f = i as f32;
        bullets.set_bullet(
            i,
            f * 0.13 - 4.0,
            3.0 - f * 0.07,
            0.25 + f * 0.01,
            0.5,
            f * 0.37,
            1.0,
            -1.0,
            BulletShape::ALL[i % BulletShape::ALL.len()],
            [255, 255, 0, 200],
        );
    }

    bullets.update_positions();
    let first = bullets.vertex_positions().to_vec();
    bullets.update_positions();

    let bits = |v: &[[f32; 8]]| -> Vec<u32> { v.iter().flatten().map(|f| f.to_bits()).collect() };
    assert_eq!(bits(&first), bits(bullets.vertex_positions()));
}

#[test]
fn test_vertices_follow_motion_and_spin() {
    let mut bullets = BulletCollection::new(1);
    bullets.set_bullet(
        0,
        0.0,
        0.0,
        1.0,
        1.0,
        0.0,
        2.0,
        0.0,
        BulletShape::Circle,
        [0; 4],
    );

    bullets.move_bullets(1.0);
    bullets.spin(std::f32::consts::PI);
    bullets.update_positions();

    // demi-tour : le coin "bas-gauche" passe en haut à droite
    let c = bullets.vertex_positions()[0];
    let eps = 1e-5;
    assert!((c[0] - 3.0).abs() < eps && (c[1] - 1.0).abs() < eps, "{:?}", c);
    assert!((c[4] - 1.0).abs() < eps && (c[5] + 1.0).abs() < eps, "{:?}", c);
}

#[test]
fn test_new_collection_is_zeroed() {
    let bullets = BulletCollection::new(4);
    assert_eq!(bullets.len(), 4);
    assert!(!bullets.is_empty());
    assert!(bullets.positions().iter().all(|p| *p == Vec2::ZERO));
    assert!(bullets.vertex_colors().iter().all(|c| *c == [0; 16]));
    assert!(BulletCollection::new(0).is_empty());
}
