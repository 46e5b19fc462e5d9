use std::collections::{HashMap, VecDeque};

use pathlab_core::{GridModel, Pos};
use pathlab_search::{AStar, AlgorithmKind, Bfs, SearchAlgorithm, SearchStatus, StepKind};
use rand::rngs::StdRng;
use rand::{RngExt, SeedableRng};

fn grid_with(rows: i32, cols: i32, start: Pos, goal: Pos) -> GridModel {
    let mut g = GridModel::new(rows, cols);
    g.set_start(start).unwrap();
    g.set_goal(goal).unwrap();
    g
}

/// Independent flood fill: hop distance from `from` to every reachable cell.
fn distances(g: &GridModel, from: Pos) -> HashMap<Pos, usize> {
    let mut dist = HashMap::new();
    let mut queue = VecDeque::new();
    dist.insert(from, 0);
    queue.push_back(from);
    while let Some(p) = queue.pop_front() {
        let d = dist[&p];
        for n in g.neighbors(p) {
            if !dist.contains_key(&n) {
                dist.insert(n, d + 1);
                queue.push_back(n);
            }
        }
    }
    dist
}

fn random_grid(seed: u64, rows: i32, cols: i32) -> GridModel {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut g = GridModel::new(rows, cols);
    for row in 0..rows {
        for col in 0..cols {
            if rng.random_range(0..100) < 30 {
                g.set_wall(Pos::new(row, col), true).unwrap();
            }
        }
    }
    let start = Pos::new(0, 0);
    let goal = Pos::new(rows - 1, cols - 1);
    g.set_wall(start, false).unwrap();
    g.set_wall(goal, false).unwrap();
    g.set_start(start).unwrap();
    g.set_goal(goal).unwrap();
    g
}

fn assert_valid_path(g: &GridModel, path: &[Pos]) {
    let start = g.start_pos().unwrap();
    assert_eq!(path.first(), g.goal_pos().as_ref());
    let mut prev = None;
    for &p in path.iter().chain(std::iter::once(&start)) {
        assert!(g.is_passage(p), "{p} is not a passage");
        if let Some(q) = prev {
            let d: Pos = p - q;
            assert_eq!(d.row.abs() + d.col.abs(), 1, "{q} -> {p} is not a step");
        }
        prev = Some(p);
    }
}

#[test]
fn open_five_by_five_bfs() {
    let mut g = grid_with(5, 5, Pos::new(0, 0), Pos::new(4, 4));
    let mut bfs = Bfs::new();
    bfs.start(&mut g).unwrap();
    bfs.run_to_end(&mut g);
    assert!(bfs.found());
    assert_eq!(bfs.path_length(), 8);
    assert_valid_path(&g, bfs.path());
}

#[test]
fn wall_row_separates_start_from_goal() {
    for kind in AlgorithmKind::ALL {
        let mut g = grid_with(5, 5, Pos::new(0, 0), Pos::new(4, 4));
        for col in 0..5 {
            g.set_wall(Pos::new(2, col), true).unwrap();
        }
        let reachable = distances(&g, Pos::new(0, 0));
        assert_eq!(reachable.len(), 10);

        let mut search = kind.build();
        search.start(&mut g).unwrap();
        let steps = search.run_to_end(&mut g);

        assert!(!search.found(), "{kind}");
        assert_eq!(search.status(), SearchStatus::NotFound);
        assert!(search.path().is_empty());
        assert!(steps <= reachable.len(), "{kind}: {steps} steps");
        assert_eq!(search.nodes_explored(), reachable.len());
        for (p, c) in g.iter() {
            assert_eq!(c.visited, reachable.contains_key(&p), "{kind}: {p}");
        }
        assert_eq!(search.log().count(StepKind::Exhausted), 1);
        assert!(!g.is_busy());
    }
}

#[test]
fn straight_corridor() {
    for kind in AlgorithmKind::ALL {
        let mut g = GridModel::new(3, 9);
        for (p, _) in g.clone().iter() {
            if p.row != 1 || p.col == 0 || p.col == 8 {
                g.set_wall(p, true).unwrap();
            }
        }
        g.set_start(Pos::new(1, 1)).unwrap();
        g.set_goal(Pos::new(1, 7)).unwrap();

        let mut search = kind.build();
        search.start(&mut g).unwrap();
        search.run_to_end(&mut g);

        assert!(search.found(), "{kind}");
        assert_eq!(search.path_length(), 6, "{kind}");
        assert_eq!(search.nodes_explored(), 6, "{kind}");
        assert_valid_path(&g, search.path());
    }
}

#[test]
fn astar_matches_bfs_on_random_grids() {
    for seed in 0..40 {
        let mut g = random_grid(seed, 12, 17);
        let expected = distances(&g, Pos::new(0, 0)).get(&Pos::new(11, 16)).copied();

        let mut bfs = Bfs::new();
        bfs.start(&mut g).unwrap();
        bfs.run_to_end(&mut g);
        let mut astar = AStar::new();
        astar.start(&mut g).unwrap();
        astar.run_to_end(&mut g);

        match expected {
            Some(d) => {
                assert!(bfs.found() && astar.found(), "seed {seed}");
                assert_eq!(bfs.path_length(), d, "seed {seed}");
                assert_eq!(astar.path_length(), d, "seed {seed}");
                assert_valid_path(&g, astar.path());
            }
            None => {
                assert!(!bfs.found() && !astar.found(), "seed {seed}");
            }
        }
        assert!(astar.nodes_explored() <= bfs.nodes_explored() + 1, "seed {seed}");
    }
}

#[test]
fn steps_bounded_by_reachable_cells() {
    for seed in 100..130 {
        for kind in AlgorithmKind::ALL {
            let mut g = random_grid(seed, 9, 11);
            let reachable = distances(&g, Pos::new(0, 0)).len();
            let mut search = kind.build();
            search.start(&mut g).unwrap();

            let mut calls = 0;
            loop {
                calls += 1;
                if search.run_step(&mut g) {
                    break;
                }
                assert!(calls <= reachable, "{kind} seed {seed}: runaway");
            }
            assert!(calls <= reachable, "{kind} seed {seed}");

            let visited = g.count(|c| c.visited);
            let explored = search.nodes_explored();
            for _ in 0..3 {
                assert!(search.run_step(&mut g));
            }
            assert_eq!(g.count(|c| c.visited), visited);
            assert_eq!(search.nodes_explored(), explored);
        }
    }
}

#[test]
fn start_twice_leaves_no_residue() {
    for kind in AlgorithmKind::ALL {
        let mut g = grid_with(6, 6, Pos::new(0, 0), Pos::new(5, 5));
        let mut search = kind.build();
        search.start(&mut g).unwrap();
        for _ in 0..7 {
            search.run_step(&mut g);
        }
        assert!(search.nodes_explored() > 0);

        search.start(&mut g).unwrap();
        assert_eq!(search.status(), SearchStatus::Running);
        assert_eq!(search.nodes_explored(), 0);
        assert!(!search.found());
        assert!(search.path().is_empty());
        assert_eq!(search.log().len(), 1);
        assert_eq!(search.log().entries()[0].kind, StepKind::Started);
        assert_eq!(g.count(|c| c.visited), 0);
        assert_eq!(g.count(|c| c.in_frontier), 1);
        assert!(g.cell(Pos::ZERO).unwrap().in_frontier);
    }
}

#[test]
fn step_log_records_a_full_run() {
    let mut g = grid_with(1, 4, Pos::new(0, 0), Pos::new(0, 3));
    let mut bfs = Bfs::new();
    bfs.start(&mut g).unwrap();
    bfs.run_to_end(&mut g);

    let kinds: Vec<StepKind> = bfs.log().iter().map(|e| e.kind).collect();
    assert_eq!(
        kinds,
        vec![
            StepKind::Started,
            StepKind::Visited,
            StepKind::NeighborsExplored,
            StepKind::Visited,
            StepKind::NeighborsExplored,
            StepKind::Visited,
            StepKind::NeighborsExplored,
            StepKind::Visited,
            StepKind::GoalReached,
            StepKind::PathReconstructed,
        ]
    );
    let explored: Vec<usize> = bfs.log().iter().map(|e| e.nodes_explored).collect();
    assert_eq!(explored, vec![0, 0, 1, 1, 2, 2, 3, 3, 3, 3]);
    assert_eq!(bfs.log().entries()[3].pos, Some(Pos::new(0, 1)));
    assert!(bfs.log().iter().zip(bfs.log().iter().skip(1)).all(|(a, b)| a.elapsed <= b.elapsed));
}

#[test]
fn summary_reflects_run() {
    let mut g = grid_with(4, 4, Pos::new(0, 0), Pos::new(3, 3));
    let mut search = AlgorithmKind::AStar.build();
    let before = search.summary();
    assert_eq!(before.status, SearchStatus::NotStarted);
    assert_eq!(before.elapsed, None);

    search.start(&mut g).unwrap();
    search.run_to_end(&mut g);
    let s = search.summary();
    assert_eq!(s.algorithm, AlgorithmKind::AStar);
    assert!(s.found);
    assert_eq!(s.path_length, 6);
    assert_eq!(s.nodes_explored, search.nodes_explored());
    assert!(search.end_time() >= search.start_time());
    assert!(s.elapsed.is_some());
}

#[test]
fn structural_edits_refused_mid_run() {
    let mut g = grid_with(4, 4, Pos::new(0, 0), Pos::new(3, 3));
    let mut search = Bfs::new();
    search.start(&mut g).unwrap();
    search.run_step(&mut g);
    assert!(g.toggle_wall(Pos::new(1, 1)).is_err());
    assert!(g.set_goal(Pos::new(2, 2)).is_err());
    search.run_to_end(&mut g);
    assert_eq!(search.path_length(), 6);
    assert!(g.toggle_wall(Pos::new(1, 1)).is_ok());
}
