use minefield_core::{
    Board, CellView, Content, Coord, Coord2, GameConfig, GameState, MinefieldGenerator,
    RandomMinefieldGenerator, RevealOutcome, MAX_SIZE, MIN_SIZE,
};
use proptest::prelude::*;
use std::collections::{BTreeSet, VecDeque};

fn config_strategy() -> impl Strategy<Value = GameConfig> {
    (MIN_SIZE..=MAX_SIZE).prop_flat_map(|size| {
        (1..=GameConfig::max_mines(size)).prop_map(move |mines| GameConfig::new(size, mines).unwrap())
    })
}

fn neighbors(board: &Board, coords: Coord2) -> Vec<Coord2> {
    let (rows, cols) = board.size();
    let mut out = Vec::new();
    for d_row in -1i16..=1 {
        for d_col in -1i16..=1 {
            if d_row == 0 && d_col == 0 {
                continue;
            }
            let row = coords.0 as i16 + d_row;
            let col = coords.1 as i16 + d_col;
            if (0..rows as i16).contains(&row) && (0..cols as i16).contains(&col) {
                out.push((row as Coord, col as Coord));
            }
        }
    }
    out
}

/// Cells a flood from `start` must open: the 8-connected zero region plus its numbered ring.
fn expected_flood(board: &Board, start: Coord2) -> BTreeSet<Coord2> {
    let mut region = BTreeSet::from([start]);
    let mut queue = VecDeque::from([start]);
    while let Some(coords) = queue.pop_front() {
        if board.cell_at(coords).content() != Content::AdjacentCount(0) {
            continue;
        }
        for next in neighbors(board, coords) {
            if board.cell_at(next).is_covered() && region.insert(next) {
                queue.push_back(next);
            }
        }
    }
    region
}

fn covered_set(board: &Board) -> BTreeSet<Coord2> {
    board
        .iter_cells()
        .filter(|(_, cell)| cell.is_covered())
        .map(|(coords, _)| coords)
        .collect()
}

fn contents(board: &Board) -> Vec<Content> {
    board.iter_cells().map(|(_, cell)| cell.content()).collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn mine_count_is_exact(config in config_strategy(), seed in any::<u64>()) {
        let board = RandomMinefieldGenerator::new(seed).generate(config);

        let mines = board.iter_cells().filter(|(_, cell)| cell.is_mine()).count();
        prop_assert_eq!(mines, config.mines as usize);
        prop_assert_eq!(board.mine_count(), config.mines);
        prop_assert_eq!(board.size(), (config.size, config.size));
    }

    #[test]
    fn adjacency_matches_brute_force(config in config_strategy(), seed in any::<u64>()) {
        let board = RandomMinefieldGenerator::new(seed).generate(config);

        for (coords, cell) in board.iter_cells() {
            if let Content::AdjacentCount(count) = cell.content() {
                let expected = neighbors(&board, coords)
                    .into_iter()
                    .filter(|&pos| board.cell_at(pos).is_mine())
                    .count();
                prop_assert_eq!(count as usize, expected, "at {:?}", coords);
            }
        }
    }

    #[test]
    fn coverage_is_monotonic(
        config in config_strategy(),
        seed in any::<u64>(),
        moves in prop::collection::vec((0..MAX_SIZE, 0..MAX_SIZE), 1..40),
    ) {
        let mut board = RandomMinefieldGenerator::new(seed).generate(config);
        let initial = contents(&board);

        for coords in moves {
            let before = covered_set(&board);
            let _ = board.reveal(coords);
            let after = covered_set(&board);
            prop_assert!(after.is_subset(&before));
            prop_assert_eq!(contents(&board), initial.clone());
        }
    }

    #[test]
    fn flood_opens_zero_region_and_border(config in config_strategy(), seed in any::<u64>()) {
        let mut board = RandomMinefieldGenerator::new(seed).generate(config);
        let zero = board
            .iter_cells()
            .find(|(_, cell)| cell.content() == Content::AdjacentCount(0))
            .map(|(coords, _)| coords);
        prop_assume!(zero.is_some());
        let start = zero.unwrap();

        let expected = expected_flood(&board, start);
        let before = covered_set(&board);

        prop_assert_eq!(board.reveal(start), Ok(RevealOutcome::FloodRevealed));

        let opened: BTreeSet<_> = before.difference(&covered_set(&board)).copied().collect();
        prop_assert_eq!(opened, expected);
    }

    #[test]
    fn mine_hit_uncovers_whole_board(config in config_strategy(), seed in any::<u64>()) {
        let mut board = RandomMinefieldGenerator::new(seed).generate(config);
        let initial = contents(&board);
        let (mine, _) = board.iter_cells().find(|(_, cell)| cell.is_mine()).unwrap();

        prop_assert_eq!(board.reveal(mine), Ok(RevealOutcome::MineHit));
        prop_assert!(board.iter_cells().all(|(_, cell)| !cell.is_covered()));
        prop_assert_eq!(contents(&board), initial);
        prop_assert_eq!(board.evaluate(), GameState::Loss);
    }

    #[test]
    fn win_iff_no_covered_safe_cells(config in config_strategy(), seed in any::<u64>(), take in 0usize..100) {
        let mut board = RandomMinefieldGenerator::new(seed).generate(config);
        let safe: Vec<Coord2> = board
            .iter_cells()
            .filter(|(_, cell)| !cell.is_mine())
            .map(|(coords, _)| coords)
            .collect();

        for &coords in safe.iter().take(take) {
            let _ = board.reveal(coords);
        }

        let covered_safe = board.iter_cells().any(|(_, cell)| cell.is_covered_safe());
        let expected = if covered_safe { GameState::Continue } else { GameState::Win };
        prop_assert_eq!(board.evaluate(), expected);
        prop_assert!(board.iter_cells().all(|(coords, cell)| !cell.is_mine() || board.view_at(coords) == CellView::Covered));
    }
}
