//! Spatial icon grid: collision-free placement, drag commit, rename, and the selected set.
//!
//! Committed icons never share a cell. Every placement goes through [`IconGrid::insert`]'s
//! resolution rule: try the desired cell, then scan column-major (down each column, then to
//! the next column) from there, wrapping to the first cell, and add a row only when every
//! cell is taken.

use std::collections::BTreeSet;

use crate::{
    config::GridConfig,
    geometry::{GridCell, GridMetrics, Point, Rect, Size},
    model::{IconId, IconKind, IconRecord, IconView},
};

pub const NEW_FILE_TITLE: &str = "New Text File";
pub const NEW_FOLDER_TITLE: &str = "New Folder";
pub const FOLDER_STYLE: &str = "text-neutral-400";

const STYLE_PALETTE: [&str; 8] = [
    "text-blue-400",
    "text-green-400",
    "text-yellow-400",
    "text-purple-400",
    "text-pink-400",
    "text-orange-400",
    "text-cyan-400",
    "text-red-400",
];

#[derive(Debug, Clone, PartialEq, Eq)]
struct IconDrag {
    /// Dragged icons in insertion order.
    ids: Vec<IconId>,
    delta: Point,
}

#[derive(Debug, Clone)]
pub struct IconGrid {
    /// Insertion order doubles as the drag commit order.
    icons: Vec<IconRecord>,
    config: GridConfig,
    metrics: GridMetrics,
    selected: BTreeSet<IconId>,
    editing: Option<IconId>,
    drag: Option<IconDrag>,
    next_seq: u64,
}

impl IconGrid {
    pub fn new(config: GridConfig) -> Self {
        Self {
            icons: Vec::new(),
            metrics: GridMetrics::fallback(&config),
            config,
            selected: BTreeSet::new(),
            editing: None,
            drag: None,
            next_seq: 0,
        }
    }

    /// Builds a grid and places `icons` at their own cells, resolving any collisions in order.
    pub fn with_icons(config: GridConfig, icons: impl IntoIterator<Item = IconRecord>) -> Self {
        let mut grid = Self::new(config);
        for icon in icons {
            let desired = icon.cell;
            grid.insert(icon, Some(desired));
        }
        grid
    }

    pub fn set_container_size(&mut self, container: Size) {
        self.metrics = GridMetrics::compute(container, &self.config);
    }

    pub fn metrics(&self) -> GridMetrics {
        self.metrics
    }

    pub fn icons(&self) -> &[IconRecord] {
        &self.icons
    }

    pub fn get(&self, icon_id: &IconId) -> Option<&IconRecord> {
        self.icons.iter().find(|icon| icon.id == *icon_id)
    }

    pub fn contains(&self, icon_id: &IconId) -> bool {
        self.get(icon_id).is_some()
    }

    /// Commits `icon` at `desired` or the next free cell after it. Returns the cell used, or
    /// `None` when an icon with the same id already exists.
    pub fn insert(&mut self, mut icon: IconRecord, desired: Option<GridCell>) -> Option<GridCell> {
        if self.contains(&icon.id) {
            return None;
        }
        let occupied = self.occupied_cells(|_| true);
        let cell = self.resolve_cell(desired, &occupied);
        icon.cell = cell;
        self.icons.push(icon);
        Some(cell)
    }

    /// Creates a new file or folder icon at the next free cell.
    pub fn create(&mut self, kind: IconKind) -> Option<IconId> {
        let (prefix, title, style) = match kind {
            IconKind::File => ("text", NEW_FILE_TITLE, self.next_style()),
            IconKind::Folder => ("folder", NEW_FOLDER_TITLE, FOLDER_STYLE.to_string()),
            IconKind::App => return None,
        };
        let id = self.next_icon_id(prefix);
        self.insert(
            IconRecord {
                id: id.clone(),
                title: title.to_string(),
                kind,
                style,
                cell: GridCell::default(),
            },
            None,
        )?;
        Some(id)
    }

    /// Removes a file or folder icon. App icons and unknown ids are left alone.
    pub fn remove(&mut self, icon_id: &IconId) -> bool {
        let Some(index) = self
            .icons
            .iter()
            .position(|icon| icon.id == *icon_id && icon.kind.is_user_mutable())
        else {
            return false;
        };
        self.icons.remove(index);
        self.selected.remove(icon_id);
        if self.editing.as_ref() == Some(icon_id) {
            self.editing = None;
        }
        if let Some(drag) = self.drag.as_mut() {
            drag.ids.retain(|id| id != icon_id);
        }
        true
    }

    /// Copies a file or folder icon to the next free cell and returns the copy's id.
    pub fn duplicate(&mut self, icon_id: &IconId) -> Option<IconId> {
        let source = self
            .get(icon_id)
            .filter(|icon| icon.kind.is_user_mutable())?
            .clone();
        let id = self.next_icon_id(source.id.as_str());
        let style = self.next_style();
        self.insert(
            IconRecord {
                id: id.clone(),
                title: format!("{} Copy", source.title),
                style,
                ..source
            },
            None,
        )?;
        Some(id)
    }

    pub fn editing(&self) -> Option<&IconId> {
        self.editing.as_ref()
    }

    pub fn is_editing(&self, icon_id: &IconId) -> bool {
        self.editing.as_ref() == Some(icon_id)
    }

    /// Enters the rename sub-state, replacing any rename in progress.
    pub fn begin_rename(&mut self, icon_id: &IconId) -> bool {
        if !self.contains(icon_id) {
            return false;
        }
        self.editing = Some(icon_id.clone());
        true
    }

    /// Ends the rename of `icon_id`. The trimmed title is applied only when non-empty; otherwise
    /// the edit is discarded. Ignored unless `icon_id` is the icon being renamed. Returns `true`
    /// when the title changed.
    pub fn commit_rename(&mut self, icon_id: &IconId, new_title: &str) -> bool {
        if !self.is_editing(icon_id) {
            return false;
        }
        self.editing = None;
        let trimmed = new_title.trim();
        if trimmed.is_empty() {
            return false;
        }
        let Some(icon) = self.icons.iter_mut().find(|icon| icon.id == *icon_id) else {
            return false;
        };
        if icon.title == trimmed {
            return false;
        }
        icon.title = trimmed.to_string();
        true
    }

    pub fn cancel_rename(&mut self) -> bool {
        self.editing.take().is_some()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Starts a visual drag. Dragging a selected icon carries the whole selection; dragging an
    /// unselected one moves only it. Icons in rename never move.
    pub fn begin_drag(&mut self, icon_id: &IconId) -> bool {
        if self.drag.is_some() || !self.contains(icon_id) || self.is_editing(icon_id) {
            return false;
        }

        let carries_selection = self.selected.contains(icon_id);
        let ids: Vec<IconId> = self
            .icons
            .iter()
            .filter(|icon| {
                if carries_selection {
                    self.selected.contains(&icon.id)
                } else {
                    icon.id == *icon_id
                }
            })
            .filter(|icon| !self.is_editing(&icon.id))
            .map(|icon| icon.id.clone())
            .collect();

        self.drag = Some(IconDrag {
            ids,
            delta: Point::default(),
        });
        true
    }

    /// Sets the pointer offset since the drag started. Nothing is committed.
    pub fn drag(&mut self, delta: Point) -> bool {
        match self.drag.as_mut() {
            Some(drag) => {
                drag.delta = delta;
                true
            }
            None => false,
        }
    }

    /// Snaps every dragged icon to the cell nearest its visual position and commits it through
    /// the insert resolution rule, in insertion order. Returns the ids that changed cell.
    pub fn end_drag(&mut self) -> Vec<IconId> {
        let Some(drag) = self.drag.take() else {
            return Vec::new();
        };

        let targets: Vec<(usize, GridCell)> = self
            .icons
            .iter()
            .enumerate()
            .filter(|(_, icon)| drag.ids.contains(&icon.id))
            .map(|(index, icon)| {
                let visual = self.metrics.cell_origin(icon.cell).offset(drag.delta);
                (index, self.metrics.nearest_cell(visual))
            })
            .collect();

        let mut occupied = self.occupied_cells(|icon| !drag.ids.contains(&icon.id));
        let mut moved = Vec::new();
        for (index, target) in targets {
            let cell = self.resolve_cell(Some(target), &occupied);
            occupied.insert(cell);
            let icon = &mut self.icons[index];
            if icon.cell != cell {
                icon.cell = cell;
                moved.push(icon.id.clone());
            }
        }
        moved
    }

    pub fn cancel_drag(&mut self) -> bool {
        self.drag.take().is_some()
    }

    /// Visual top-left of `icon_id` while it is part of an uncommitted drag.
    pub fn drag_position(&self, icon_id: &IconId) -> Option<Point> {
        let drag = self.drag.as_ref()?;
        if !drag.ids.contains(icon_id) {
            return None;
        }
        let icon = self.get(icon_id)?;
        Some(self.metrics.cell_origin(icon.cell).offset(drag.delta))
    }

    pub fn is_selected(&self, icon_id: &IconId) -> bool {
        self.selected.contains(icon_id)
    }

    /// Selected ids in insertion order.
    pub fn selected_ids(&self) -> Vec<IconId> {
        self.icons
            .iter()
            .filter(|icon| self.selected.contains(&icon.id))
            .map(|icon| icon.id.clone())
            .collect()
    }

    pub fn select_only(&mut self, icon_id: &IconId) -> bool {
        if !self.contains(icon_id) {
            return false;
        }
        self.selected.clear();
        self.selected.insert(icon_id.clone());
        true
    }

    pub fn toggle_selected(&mut self, icon_id: &IconId) -> bool {
        if !self.contains(icon_id) {
            return false;
        }
        if !self.selected.remove(icon_id) {
            self.selected.insert(icon_id.clone());
        }
        true
    }

    /// Replaces the selected set; unknown ids are dropped.
    pub fn set_selection(&mut self, ids: impl IntoIterator<Item = IconId>) {
        self.selected = ids.into_iter().filter(|id| self.contains(id)).collect();
    }

    pub fn clear_selection(&mut self) -> bool {
        let had_selection = !self.selected.is_empty();
        self.selected.clear();
        had_selection
    }

    /// Committed pixel bounds of every icon, container-relative.
    pub fn icon_bounds(&self) -> Vec<(IconId, Rect)> {
        self.icons
            .iter()
            .map(|icon| (icon.id.clone(), self.metrics.cell_bounds(icon.cell)))
            .collect()
    }

    pub fn views(&self) -> Vec<IconView> {
        self.icons
            .iter()
            .map(|icon| IconView {
                id: icon.id.clone(),
                title: icon.title.clone(),
                kind: icon.kind,
                style: icon.style.clone(),
                cell: icon.cell,
                bounds: self.metrics.cell_bounds(icon.cell),
                selected: self.selected.contains(&icon.id),
                editing: self.is_editing(&icon.id),
                drag_position: self.drag_position(&icon.id),
            })
            .collect()
    }

    fn occupied_cells(&self, include: impl Fn(&IconRecord) -> bool) -> BTreeSet<GridCell> {
        self.icons
            .iter()
            .filter(|icon| include(icon))
            .map(|icon| icon.cell)
            .collect()
    }

    /// Picks the cell for a placement. Visible rows are scanned first; rows added by earlier
    /// overflow are only used once the visible grid is full, and a new row only once they are too.
    fn resolve_cell(&self, desired: Option<GridCell>, occupied: &BTreeSet<GridCell>) -> GridCell {
        let columns = self.metrics.columns.max(1);
        let visible_rows = self.metrics.rows.max(1);
        let start = desired
            .map(|cell| {
                GridCell::new(
                    cell.x.clamp(0, columns - 1),
                    cell.y.clamp(0, visible_rows - 1),
                )
            })
            .unwrap_or_default();

        if let Some(cell) = first_free_cell(columns, visible_rows, start, occupied) {
            return cell;
        }
        let used_rows = occupied
            .iter()
            .map(|cell| cell.y + 1)
            .max()
            .unwrap_or(0)
            .max(visible_rows);
        if used_rows > visible_rows {
            if let Some(cell) = first_free_cell(columns, used_rows, GridCell::default(), occupied) {
                return cell;
            }
        }
        GridCell::new(0, used_rows)
    }

    fn next_icon_id(&mut self, prefix: &str) -> IconId {
        loop {
            self.next_seq += 1;
            let candidate = IconId::new(format!("{prefix}-{}", self.next_seq));
            if !self.contains(&candidate) {
                return candidate;
            }
        }
    }

    fn next_style(&self) -> String {
        STYLE_PALETTE[self.icons.len() % STYLE_PALETTE.len()].to_string()
    }
}

/// Column-major scan of a `columns` x `rows` grid from `start`, wrapping to the first cell.
fn first_free_cell(
    columns: i32,
    rows: i32,
    start: GridCell,
    occupied: &BTreeSet<GridCell>,
) -> Option<GridCell> {
    let total = columns * rows;
    let start_index = start.x * rows + start.y;
    (0..total)
        .map(|step| (start_index + step) % total)
        .map(|index| GridCell::new(index / rows, index % rows))
        .find(|cell| !occupied.contains(cell))
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use pretty_assertions::assert_eq;

    use super::*;

    fn config(columns: i32) -> GridConfig {
        GridConfig {
            columns,
            ..GridConfig::default()
        }
    }

    /// 4 columns x 4 rows of 100px cells with an 8px gap.
    fn grid4() -> IconGrid {
        let mut grid = IconGrid::new(config(4));
        grid.set_container_size(Size::new(440, 440));
        grid
    }

    fn icon(id: &str, kind: IconKind) -> IconRecord {
        IconRecord {
            id: IconId::new(id),
            title: id.to_string(),
            kind,
            style: "s".to_string(),
            cell: GridCell::default(),
        }
    }

    fn id(raw: &str) -> IconId {
        IconId::new(raw)
    }

    fn cell_of(grid: &IconGrid, raw: &str) -> GridCell {
        grid.get(&id(raw)).expect("icon").cell
    }

    fn seeded() -> IconGrid {
        let mut grid = grid4();
        for (n, name) in ["a", "b", "c", "d", "e", "f", "g", "h"].iter().enumerate() {
            let n = n as i32;
            grid.insert(icon(name, IconKind::File), Some(GridCell::new(n % 4, n / 4)));
        }
        grid
    }

    #[test]
    fn insert_uses_free_desired_cell() {
        let mut grid = grid4();
        assert_eq!(
            grid.insert(icon("a", IconKind::File), Some(GridCell::new(2, 3))),
            Some(GridCell::new(2, 3))
        );
    }

    #[test]
    fn occupied_desired_cell_scans_down_the_column_first() {
        let mut grid = grid4();
        grid.insert(icon("a", IconKind::File), Some(GridCell::new(1, 1)));
        grid.insert(icon("b", IconKind::File), Some(GridCell::new(1, 2)));
        assert_eq!(
            grid.insert(icon("c", IconKind::File), Some(GridCell::new(1, 1))),
            Some(GridCell::new(1, 3))
        );
        // column 1 is now full from row 1 down, so the scan moves to the next column
        assert_eq!(
            grid.insert(icon("d", IconKind::File), Some(GridCell::new(1, 1))),
            Some(GridCell::new(2, 0))
        );
    }

    #[test]
    fn omitted_cell_starts_from_the_first_cell_and_wraps() {
        let mut grid = grid4();
        grid.insert(icon("a", IconKind::File), Some(GridCell::new(0, 0)));
        assert_eq!(
            grid.insert(icon("b", IconKind::File), None),
            Some(GridCell::new(0, 1))
        );

        let mut grid = grid4();
        for row in 0..4 {
            grid.insert(icon(&format!("last{row}"), IconKind::File), Some(GridCell::new(3, row)));
        }
        grid.insert(icon("x", IconKind::File), Some(GridCell::new(0, 0)));
        assert_eq!(
            grid.insert(icon("y", IconKind::File), Some(GridCell::new(3, 0))),
            Some(GridCell::new(0, 1))
        );
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let mut grid = grid4();
        grid.insert(icon("a", IconKind::File), None);
        assert_eq!(grid.insert(icon("a", IconKind::Folder), None), None);
        assert_eq!(grid.icons().len(), 1);
    }

    #[test]
    fn inserts_never_collide_and_overflow_grows_a_row() {
        let mut grid = grid4();
        let capacity = 16;
        for n in 0..capacity {
            let desired = (n % 3 == 0).then(|| GridCell::new(n % 4, 0));
            grid.insert(icon(&format!("i{n}"), IconKind::File), desired);
        }
        let cells: HashSet<GridCell> = grid.icons().iter().map(|icon| icon.cell).collect();
        assert_eq!(cells.len(), capacity as usize);
        assert!(cells.iter().all(|cell| cell.y < 4));

        assert_eq!(
            grid.insert(icon("overflow", IconKind::File), Some(GridCell::new(2, 2))),
            Some(GridCell::new(0, 4))
        );
        assert_eq!(
            grid.insert(icon("overflow2", IconKind::File), None),
            Some(GridCell::new(1, 4))
        );
    }

    #[test]
    fn placement_is_reproducible() {
        let build = || {
            let mut grid = grid4();
            for n in 0..10 {
                grid.insert(icon(&format!("i{n}"), IconKind::File), Some(GridCell::new(1, 1)));
            }
            grid.icons().to_vec()
        };
        assert_eq!(build(), build());
    }

    #[test]
    fn with_icons_resolves_collisions_and_clamps_columns() {
        let mut seeds = vec![icon("a", IconKind::App), icon("b", IconKind::App)];
        seeds[0].cell = GridCell::new(3, 0);
        seeds[1].cell = GridCell::new(3, 0);
        let grid = IconGrid::with_icons(config(2), seeds);
        assert_eq!(cell_of(&grid, "a"), GridCell::new(1, 0));
        assert_eq!(cell_of(&grid, "b"), GridCell::new(1, 1));
    }

    #[test]
    fn drag_is_visual_until_end() {
        let mut grid = seeded();
        assert!(grid.begin_drag(&id("a")));
        grid.drag(Point::new(230, 5));
        assert_eq!(cell_of(&grid, "a"), GridCell::new(0, 0));
        assert_eq!(grid.drag_position(&id("a")), Some(Point::new(238, 13)));
        assert_eq!(grid.drag_position(&id("b")), None);

        // lands on (2, 0), occupied by "c": scan continues down column 2
        assert_eq!(grid.end_drag(), vec![id("a")]);
        assert_eq!(cell_of(&grid, "a"), GridCell::new(2, 2));
        assert!(!grid.is_dragging());
    }

    #[test]
    fn dropping_on_a_free_cell_snaps_to_the_nearest_one() {
        let mut grid = seeded();
        grid.begin_drag(&id("h"));
        // (3, 1) origin is (332, 116); +(-300, +130) lands nearest (0, 2)
        grid.drag(Point::new(-300, 130));
        grid.end_drag();
        assert_eq!(cell_of(&grid, "h"), GridCell::new(0, 2));
    }

    #[test]
    fn zero_delta_drag_keeps_cells() {
        let mut grid = seeded();
        grid.select_only(&id("a"));
        grid.toggle_selected(&id("b"));
        grid.begin_drag(&id("a"));
        assert!(grid.end_drag().is_empty());
        assert_eq!(cell_of(&grid, "a"), GridCell::new(0, 0));
        assert_eq!(cell_of(&grid, "b"), GridCell::new(1, 0));
    }

    #[test]
    fn multi_drag_moves_the_selection_and_commits_in_insertion_order() {
        let mut grid = grid4();
        grid.insert(icon("first", IconKind::File), Some(GridCell::new(0, 0)));
        grid.insert(icon("second", IconKind::File), Some(GridCell::new(0, 1)));
        grid.insert(icon("blocker", IconKind::File), Some(GridCell::new(1, 1)));
        grid.set_selection([id("second"), id("first")]);

        grid.begin_drag(&id("second"));
        grid.drag(Point::new(108, 0));
        let moved = grid.end_drag();

        assert_eq!(moved, vec![id("first"), id("second")]);
        assert_eq!(cell_of(&grid, "first"), GridCell::new(1, 0));
        // (1, 1) is taken by the blocker, next down the column
        assert_eq!(cell_of(&grid, "second"), GridCell::new(1, 2));
        assert_eq!(cell_of(&grid, "blocker"), GridCell::new(1, 1));
    }

    #[test]
    fn dragging_an_unselected_icon_leaves_the_selection_behind() {
        let mut grid = seeded();
        grid.select_only(&id("a"));
        grid.begin_drag(&id("b"));
        grid.drag(Point::new(0, 216));
        grid.end_drag();
        assert_eq!(cell_of(&grid, "a"), GridCell::new(0, 0));
        assert_eq!(cell_of(&grid, "b"), GridCell::new(1, 2));
        assert_eq!(grid.selected_ids(), vec![id("a")]);
    }

    #[test]
    fn cancel_drag_reverts() {
        let mut grid = seeded();
        grid.begin_drag(&id("a"));
        grid.drag(Point::new(400, 400));
        assert!(grid.cancel_drag());
        assert_eq!(grid.end_drag(), Vec::<IconId>::new());
        assert_eq!(cell_of(&grid, "a"), GridCell::new(0, 0));
    }

    #[test]
    fn committed_cells_stay_unique_after_drags() {
        let mut grid = seeded();
        let mut rng = fastrand::Rng::with_seed(3);
        let ids: Vec<IconId> = grid.icons().iter().map(|icon| icon.id.clone()).collect();
        for _ in 0..200 {
            let target = &ids[rng.usize(..ids.len())];
            if rng.bool() {
                grid.toggle_selected(target);
            }
            grid.begin_drag(target);
            grid.drag(Point::new(rng.i32(-400..400), rng.i32(-400..400)));
            grid.end_drag();
            let cells: HashSet<GridCell> = grid.icons().iter().map(|icon| icon.cell).collect();
            assert_eq!(cells.len(), grid.icons().len());
        }
    }

    #[test]
    fn app_icons_cannot_be_removed_or_duplicated() {
        let mut grid = grid4();
        grid.insert(icon("app", IconKind::App), None);
        assert!(!grid.remove(&id("app")));
        assert_eq!(grid.duplicate(&id("app")), None);
        assert!(grid.contains(&id("app")));
    }

    #[test]
    fn remove_drops_selection_and_rename_state() {
        let mut grid = grid4();
        grid.insert(icon("doc", IconKind::File), None);
        grid.select_only(&id("doc"));
        grid.begin_rename(&id("doc"));

        assert!(grid.remove(&id("doc")));
        assert!(grid.selected_ids().is_empty());
        assert_eq!(grid.editing(), None);
        assert!(!grid.remove(&id("doc")));
    }

    #[test]
    fn duplicate_copies_to_the_next_free_cell() {
        let mut grid = grid4();
        grid.insert(icon("doc", IconKind::File), Some(GridCell::new(0, 0)));
        let copy = grid.duplicate(&id("doc")).expect("copy");

        assert_eq!(copy, id("doc-1"));
        let record = grid.get(&copy).expect("copy record");
        assert_eq!(record.title, "doc Copy");
        assert_eq!(record.kind, IconKind::File);
        assert_eq!(record.cell, GridCell::new(0, 1));
    }

    #[test]
    fn create_assigns_fresh_ids_titles_and_cells() {
        let mut grid = grid4();
        let file = grid.create(IconKind::File).expect("file");
        let folder = grid.create(IconKind::Folder).expect("folder");
        assert_eq!(grid.create(IconKind::App), None);

        assert_eq!(file, id("text-1"));
        assert_eq!(folder, id("folder-2"));
        assert_eq!(grid.get(&file).unwrap().title, NEW_FILE_TITLE);
        assert_eq!(grid.get(&folder).unwrap().title, NEW_FOLDER_TITLE);
        assert_eq!(grid.get(&folder).unwrap().style, FOLDER_STYLE);
        assert_eq!(cell_of(&grid, "folder-2"), GridCell::new(0, 1));
    }

    #[test]
    fn rename_applies_trimmed_titles_and_discards_blank_ones() {
        let mut grid = grid4();
        grid.insert(icon("doc", IconKind::File), None);

        assert!(grid.begin_rename(&id("doc")));
        assert!(grid.is_editing(&id("doc")));
        assert!(!grid.commit_rename(&id("doc"), "   "));
        assert_eq!(grid.get(&id("doc")).unwrap().title, "doc");
        assert_eq!(grid.editing(), None);

        grid.begin_rename(&id("doc"));
        assert!(grid.commit_rename(&id("doc"), "  Report  "));
        assert_eq!(grid.get(&id("doc")).unwrap().title, "Report");
        assert!(!grid.begin_rename(&id("missing")));
    }

    #[test]
    fn commit_without_a_matching_rename_changes_nothing() {
        let mut grid = grid4();
        grid.insert(icon("doc", IconKind::File), None);
        grid.insert(icon("app", IconKind::App), None);

        assert!(!grid.commit_rename(&id("app"), "Renamed"));
        assert_eq!(grid.get(&id("app")).unwrap().title, "app");

        grid.begin_rename(&id("doc"));
        assert!(!grid.commit_rename(&id("app"), "Renamed"));
        assert_eq!(grid.get(&id("app")).unwrap().title, "app");
        assert!(grid.is_editing(&id("doc")));
    }

    #[test]
    fn drops_past_the_bottom_stay_on_the_visible_grid() {
        let mut grid = seeded();
        grid.begin_drag(&id("b"));
        grid.drag(Point::new(0, 5_000));
        grid.end_drag();
        assert_eq!(cell_of(&grid, "b"), GridCell::new(1, 3));

        // (0, 2) and (0, 3) are free, then column 1 has (1, 0) again
        let created: Vec<GridCell> = (0..3)
            .map(|_| {
                let new_id = grid.create(IconKind::Folder).expect("folder");
                grid.get(&new_id).unwrap().cell
            })
            .collect();
        assert_eq!(
            created,
            vec![GridCell::new(0, 2), GridCell::new(0, 3), GridCell::new(1, 0)]
        );
    }

    #[test]
    fn overflow_rows_are_used_only_after_the_visible_grid_fills() {
        let mut grid = grid4();
        for n in 0..17 {
            grid.insert(icon(&format!("i{n}"), IconKind::File), None);
        }
        assert_eq!(cell_of(&grid, "i16"), GridCell::new(0, 4));

        grid.remove(&id("i5"));
        assert_eq!(
            grid.insert(icon("refill", IconKind::File), None),
            Some(GridCell::new(1, 1))
        );
        assert_eq!(
            grid.insert(icon("next", IconKind::File), Some(GridCell::new(3, 3))),
            Some(GridCell::new(1, 4))
        );
    }

    #[test]
    fn renaming_icon_cannot_be_dragged() {
        let mut grid = seeded();
        grid.begin_rename(&id("a"));
        assert!(!grid.begin_drag(&id("a")));

        grid.set_selection([id("a"), id("b")]);
        assert!(grid.begin_drag(&id("b")));
        grid.drag(Point::new(0, 216));
        assert_eq!(grid.end_drag(), vec![id("b")]);
        assert_eq!(cell_of(&grid, "a"), GridCell::new(0, 0));
    }

    #[test]
    fn selection_click_semantics() {
        let mut grid = seeded();
        grid.select_only(&id("c"));
        grid.toggle_selected(&id("a"));
        assert_eq!(grid.selected_ids(), vec![id("a"), id("c")]);

        grid.toggle_selected(&id("c"));
        assert_eq!(grid.selected_ids(), vec![id("a")]);

        grid.select_only(&id("b"));
        assert_eq!(grid.selected_ids(), vec![id("b")]);

        grid.set_selection([id("missing"), id("d")]);
        assert_eq!(grid.selected_ids(), vec![id("d")]);
        assert!(grid.clear_selection());
        assert!(!grid.clear_selection());
    }

    #[test]
    fn views_report_bounds_and_state() {
        let mut grid = seeded();
        grid.select_only(&id("b"));
        let views = grid.views();
        assert_eq!(views[1].bounds, Rect::new(116, 8, 100, 100));
        assert!(views[1].selected);
        assert!(!views[0].selected);
        assert_eq!(views[0].drag_position, None);
    }
}
