use rwalk_core::{available_directions, distance, opposite, towards, Direction, Point};

#[test]
fn moving_translates_along_one_axis() {
    let p = Point::new(5, 5);
    assert_eq!(p.moved(Direction::North, 1), Point::new(5, 6));
    assert_eq!(p.moved(Direction::West, 2), Point::new(3, 5));
    assert_eq!(p.moved(Direction::South, 3), Point::new(5, 2));
    assert_eq!(p.moved(Direction::East, 0), p);
}

#[test]
fn distance_is_euclidean() {
    assert_eq!(distance(Point::ORIGIN, Point::new(3, 4)), 5.0);
    assert_eq!(distance(Point::new(-1, -1), Point::new(-1, -1)), 0.0);
    assert_eq!(
        distance(Point::new(1, 2), Point::new(4, 6)),
        distance(Point::new(4, 6), Point::new(1, 2))
    );
}

#[test]
fn available_directions_keep_order() {
    assert_eq!(available_directions(None), Direction::ALL.to_vec());
    assert_eq!(
        available_directions(Some(Direction::East)),
        vec![Direction::North, Direction::South, Direction::West]
    );
    assert_eq!(
        available_directions(opposite(Some(Direction::North))),
        vec![Direction::North, Direction::East, Direction::West]
    );
}

#[test]
fn towards_inverts_a_unit_move() {
    let p = Point::new(-3, 8);
    for d in Direction::ALL {
        assert_eq!(towards(p, p.moved(d, 1)), Some(d));
        assert_eq!(towards(p.moved(d, 1), p), Some(d.opposite()));
    }
}

#[test]
fn points_and_directions_serialize_as_plain_data() {
    let json = serde_json::to_string(&(Point::new(1, -2), Direction::West)).unwrap();
    assert_eq!(json, r#"[{"x":1,"y":-2},"west"]"#);
}
