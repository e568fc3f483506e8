/// ROI × urgency priority matrix
///
/// Included scope items are projected onto a 5×5 grid of 20-unit cells
/// (ROI impact on the x axis, urgency on the y axis) and labelled with one of
/// four display quadrants. The quadrants are a display heuristic only;
/// nothing else in the crate schedules work from them.
use super::classification::CategoryClass;
use super::urgency::urgency_score;
use crate::core::{PriorityTier, ScopeItem};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Number of cells along each axis.
pub const GRID_SIZE: usize = 5;
/// Width of one cell in score units.
pub const CELL_WIDTH: f64 = 20.0;
/// Boundary between "low" and "high" on both axes for quadrant labels.
pub const QUADRANT_THRESHOLD: f64 = 60.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Quadrant {
    DoFirst,
    Schedule,
    Delegate,
    Eliminate,
}

impl Quadrant {
    pub const ALL: [Quadrant; 4] = [
        Quadrant::DoFirst,
        Quadrant::Schedule,
        Quadrant::Delegate,
        Quadrant::Eliminate,
    ];

    pub fn classify(roi_impact: f64, urgency: f64) -> Self {
        let high_roi = roi_impact >= QUADRANT_THRESHOLD;
        let high_urgency = urgency >= QUADRANT_THRESHOLD;
        match (high_roi, high_urgency) {
            (true, true) => Quadrant::DoFirst,
            (true, false) => Quadrant::Schedule,
            (false, true) => Quadrant::Delegate,
            (false, false) => Quadrant::Eliminate,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Quadrant::DoFirst => "Do First",
            Quadrant::Schedule => "Schedule",
            Quadrant::Delegate => "Delegate",
            Quadrant::Eliminate => "Eliminate",
        }
    }
}

/// Projection of a scope item for matrix placement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriorityMatrixItem {
    pub id: String,
    pub name: String,
    pub category: CategoryClass,
    pub roi_impact: f64,
    pub urgency: u32,
    pub cost: f64,
    pub priority: PriorityTier,
    pub included: bool,
}

impl PriorityMatrixItem {
    pub fn from_item(item: &ScopeItem) -> Self {
        Self {
            id: item.id.clone(),
            name: item.item_name.clone(),
            category: item.category_class(),
            roi_impact: item.roi_impact,
            urgency: urgency_score(item),
            cost: item.total_cost,
            priority: item.priority,
            included: item.included,
        }
    }

    /// Grid cell `(x, y)`: x from ROI impact, y from urgency.
    pub fn cell(&self) -> (usize, usize) {
        (cell_index(self.roi_impact), cell_index(self.urgency as f64))
    }

    pub fn quadrant(&self) -> Quadrant {
        Quadrant::classify(self.roi_impact, self.urgency as f64)
    }
}

/// Cell index along one axis, clamped to the grid. Non-finite and negative
/// values land in the first cell.
pub fn cell_index(value: f64) -> usize {
    if !value.is_finite() || value <= 0.0 {
        return 0;
    }
    ((value / CELL_WIDTH).floor() as usize).min(GRID_SIZE - 1)
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriorityMatrix {
    items: Vec<PriorityMatrixItem>,
}

impl PriorityMatrix {
    /// Build the matrix from the included subset of `items`.
    pub fn build(items: &[ScopeItem]) -> Self {
        let items: Vec<_> = items
            .iter()
            .filter(|item| item.included)
            .map(PriorityMatrixItem::from_item)
            .collect();
        tracing::trace!(items = items.len(), "Built priority matrix");
        Self { items }
    }

    pub fn items(&self) -> &[PriorityMatrixItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn get(&self, id: &str) -> Option<&PriorityMatrixItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Item ids per cell, indexed `[y][x]`.
    pub fn grid(&self) -> Vec<Vec<Vec<String>>> {
        let mut grid = vec![vec![Vec::new(); GRID_SIZE]; GRID_SIZE];
        for item in &self.items {
            let (x, y) = item.cell();
            grid[y][x].push(item.id.clone());
        }
        grid
    }

    pub fn in_quadrant(&self, quadrant: Quadrant) -> impl Iterator<Item = &PriorityMatrixItem> {
        self.items
            .iter()
            .filter(move |item| item.quadrant() == quadrant)
    }

    /// Human-readable advice, one line per populated quadrant.
    pub fn recommendations(&self) -> Vec<String> {
        if self.items.is_empty() {
            return Vec::new();
        }

        let mut lines: Vec<String> = Quadrant::ALL
            .iter()
            .filter_map(|quadrant| {
                let (count, cost) = self
                    .in_quadrant(*quadrant)
                    .fold((0usize, 0.0f64), |(n, c), item| (n + 1, c + item.cost));
                (count > 0).then(|| quadrant_advice(*quadrant, count, cost))
            })
            .collect();

        let urgent = self
            .items
            .iter()
            .filter(|item| item.urgency as f64 >= QUADRANT_THRESHOLD)
            .count();
        lines.push(format!(
            "{} of {} included items are urgent (urgency >= {}).",
            urgent,
            self.items.len(),
            QUADRANT_THRESHOLD
        ));
        lines
    }
}

fn quadrant_advice(quadrant: Quadrant, count: usize, cost: f64) -> String {
    let noun = if count == 1 { "item" } else { "items" };
    match quadrant {
        Quadrant::DoFirst => format!(
            "Do First: {} {} with high ROI and high urgency (${:.0}). Start these immediately.",
            count, noun, cost
        ),
        Quadrant::Schedule => format!(
            "Schedule: {} high-ROI {} that can wait (${:.0}). Plan them into later phases.",
            count, noun, cost
        ),
        Quadrant::Delegate => format!(
            "Delegate: {} urgent {} with lower ROI (${:.0}). Hand them to a contractor to keep them moving.",
            count, noun, cost
        ),
        Quadrant::Eliminate => format!(
            "Eliminate: {} low-ROI, low-urgency {} (${:.0}). Consider cutting them if over budget.",
            count, noun, cost
        ),
    }
}

/// MoSCoW board: items grouped by declared priority tier, every tier present.
pub fn group_by_priority(items: &[ScopeItem]) -> BTreeMap<PriorityTier, Vec<&ScopeItem>> {
    let mut board: BTreeMap<PriorityTier, Vec<&ScopeItem>> =
        PriorityTier::ALL.iter().map(|tier| (*tier, Vec::new())).collect();
    for item in items {
        board.entry(item.priority).or_default().push(item);
    }
    board
}
