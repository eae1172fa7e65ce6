use super::*;

#[test]
fn test_parse_target_forms() {
    let (direction, id, label) = parse_target("up.3.add_tags").unwrap();
    assert_eq!(direction, Direction::Up);
    assert_eq!(id, "3");
    assert_eq!(label, "add_tags");

    let (direction, id, label) = parse_target("down.0").unwrap();
    assert_eq!(direction, Direction::Down);
    assert_eq!(id, "0");
    assert_eq!(label, "");

    // Labels keep their inner dots
    let (_, _, label) = parse_target("up.1.users.and.roles").unwrap();
    assert_eq!(label, "users.and.roles");
}

#[test]
fn test_parse_target_rejects_garbage() {
    assert!(parse_target("sideways.1.x").is_err());
    assert!(parse_target("up.notanumber.x").is_err());
    assert!(parse_target("up").is_err());
    assert!(parse_target("up..x").is_err());
}
