use crate::{
    overlap, Cell, Grid, InvalidArgument, Region, RegionId, Side, Slot, GRID_WIDTH,
};

/// Marks positions that are not part of a region.
const EMPTY_MARKER: &str = "-";
const KEY_MARKER: &str = "k";

/// Lays out one entry per board position, `GRID_WIDTH` per line.
fn render_entries<I, T>(entries: I) -> String
where
    I: IntoIterator<Item = T>,
    T: ToString,
{
    let width = usize::from(GRID_WIDTH);
    let mut result = String::new();
    for (idx, entry) in entries.into_iter().enumerate() {
        result += &format!("{:^2} ", entry.to_string());
        if idx % width == width - 1 {
            result.push('\n');
        }
    }
    result
}

/// The coin of every cell in board order.
pub fn render_board(grid: &Grid) -> String {
    render_entries(grid.cells_in_order().map(Cell::coin))
}

/// The home number of every cell in board order, which shows how the board
/// has been swapped.
pub fn render_board_numbers(grid: &Grid) -> String {
    render_entries(grid.cells_in_order().map(Cell::home_num))
}

/// The coins of the cells in `region`, and a marker for every other position.
pub fn render_masked(grid: &Grid, region: &Region) -> String {
    render_entries(region.iter().map(|slot| match slot {
        Slot::Occupied(id) => grid.cell(*id).coin().to_string(),
        Slot::Empty => String::from(EMPTY_MARKER),
    }))
}

pub fn render_region(grid: &Grid, region_id: RegionId, side: Side) -> String {
    let region = grid.region(region_id, side);
    format!(
        "region{}, parity={}\n{}",
        region_id,
        grid.parity(region),
        render_masked(grid, region)
    )
}

pub fn render_parity(grid: &Grid, region_id: RegionId, side: Side) -> String {
    format!(
        "region{} parity={}",
        region_id,
        grid.parity(grid.region(region_id, side))
    )
}

/// The parities of all regions, one line per side.
pub fn render_parity_vectors(grid: &Grid) -> String {
    let [side_0, side_1] = Side::BOTH.map(|side| {
        RegionId::ALL
            .into_iter()
            .map(|region_id| grid.parity(grid.region(region_id, side)).to_string())
            .collect::<String>()
    });
    format!("side0: {}\nside1: {}", side_0, side_1)
}

/// The cells that lie in all of the given region sides.
pub fn render_overlap(grid: &Grid, region_sides: &[(RegionId, Side)]) -> String {
    let regions: Vec<&Region> = region_sides
        .iter()
        .map(|&(region_id, side)| grid.region(region_id, side))
        .collect();
    render_masked(grid, &overlap(&regions))
}

pub fn render_key_only(grid: &Grid) -> String {
    render_entries(grid.cells_in_order().map(|cell| {
        if cell.is_key() {
            KEY_MARKER
        } else {
            EMPTY_MARKER
        }
    }))
}

/// The coin of the cell at `(x, y)`, and a marker for every other position.
pub fn render_only_xy(grid: &Grid, x: i64, y: i64) -> String {
    render_entries(grid.cells_in_order().map(|cell| {
        if i64::from(cell.x()) == x && i64::from(cell.y()) == y {
            cell.coin().to_string()
        } else {
            String::from(EMPTY_MARKER)
        }
    }))
}

/// Like [`render_board_numbers()`] after [`Grid::swap()`], but without swapping.
pub fn render_swapped_numbers(grid: &Grid, swap_index: usize) -> Result<String, InvalidArgument> {
    Ok(render_entries(grid.swapped_numbers(swap_index)?))
}
