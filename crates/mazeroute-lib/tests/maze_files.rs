use std::fs;

use mazeroute_lib::{find_route_a_star, Error, MazeGrid, Point, QLearningConfig};
use tempfile::TempDir;

const CORRIDOR: &str = "\
0 0 0 0 0 1
1 1 1 1 0 1
0 0 0 0 0 1
1 1 1 1 1 1
";

#[test]
fn load_reads_doubled_grid_from_disk() {
    let dir = TempDir::new().expect("create temp dir");
    let path = dir.path().join("corridor.txt");
    fs::write(&path, CORRIDOR).expect("write maze file");

    let maze = MazeGrid::load(&path).expect("maze loads");
    assert_eq!(maze.rows(), 4);
    assert_eq!(maze.cols(), 6);
    assert_eq!(maze.logical_rows(), 2);
    assert_eq!(maze.logical_cols(), 3);

    let route = find_route_a_star(&maze, Point::new(0, 0), Point::new(1, 0)).expect("route");
    // (0,0) -> (0,1) -> (0,2) -> (1,2) -> (1,1) -> (1,0)
    assert_eq!(route.len(), 11);
}

#[test]
fn saved_maze_loads_back_identically() {
    let maze = MazeGrid::open(3, 2);
    let dir = TempDir::new().expect("create temp dir");
    let path = dir.path().join("open.txt");
    fs::write(&path, maze.to_string()).expect("write maze file");

    assert_eq!(MazeGrid::load(&path).expect("maze loads"), maze);
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = TempDir::new().expect("create temp dir");
    let error = MazeGrid::load(&dir.path().join("absent.txt")).unwrap_err();
    assert!(matches!(error, Error::Io(_)));
}

#[test]
fn odd_dimensions_are_rejected() {
    let dir = TempDir::new().expect("create temp dir");
    let path = dir.path().join("odd.txt");
    fs::write(&path, "000\n010\n").expect("write maze file");

    let error = MazeGrid::load(&path).unwrap_err();
    assert!(matches!(error, Error::InvalidMaze { .. }));
}

#[test]
fn learning_config_loads_partial_overrides() {
    let dir = TempDir::new().expect("create temp dir");
    let path = dir.path().join("learning.json");
    fs::write(&path, r#"{ "episodes": 50, "seed": 9, "gamma": 0.5 }"#).expect("write config");

    let config = QLearningConfig::load(&path).expect("config loads");
    assert_eq!(config.episodes, Some(50));
    assert_eq!(config.seed, Some(9));
    assert_eq!(config.gamma, 0.5);
    assert_eq!(config.alpha, QLearningConfig::default().alpha);
}

#[test]
fn malformed_learning_config_is_a_json_error() {
    let dir = TempDir::new().expect("create temp dir");
    let path = dir.path().join("learning.json");
    fs::write(&path, "{ episodes: ").expect("write config");

    assert!(matches!(
        QLearningConfig::load(&path).unwrap_err(),
        Error::Json(_)
    ));
}
