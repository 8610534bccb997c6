use crate::data::{Error, Spending};
use rust_decimal::{prelude::ToPrimitive, Decimal};
use std::path::Path;
use svg::{
    node::{
        element::{Circle, Path as SvgPath, Text},
        Text as TextNode,
    },
    Document,
};

pub const TITLE: &str = "Your Expense Distribution";
/// Where the first slice begins, in degrees counter-clockwise from 3 o'clock.
pub const START_ANGLE: f64 = 140.0;

const WIDTH: f64 = 800.0;
const HEIGHT: f64 = 600.0;
const CENTER: (f64, f64) = (WIDTH / 2.0, HEIGHT / 2.0 + 20.0);
const RADIUS: f64 = 200.0;

const COLORS: &[&str] = &[
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
    "#bcbd22", "#17becf",
];

/// One category's wedge. Angles are in degrees and grow counter-clockwise;
/// `end` may go past 360.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Slice {
    pub category: String,
    pub amount: Decimal,
    pub share: f64,
    pub start: f64,
    pub end: f64,
}

impl Slice {
    /// Share of the whole pie, one decimal: "42.9%".
    pub fn percent(&self) -> String {
        format!("{:.1}%", self.share * 100.0)
    }

    fn middle(&self) -> f64 {
        (self.start + self.end) / 2.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct PieChart {
    pub title: &'static str,
    pub slices: Vec<Slice>,
}

impl PieChart {
    /// Lays out one slice per category with a positive total. `None` when
    /// there is nothing a pie could show; an error when the slices add up
    /// past what a `Decimal` holds.
    pub fn from_spending(spending: &Spending) -> Result<Option<Self>, Error> {
        let positive = spending
            .iter()
            .filter(|(_, amount)| amount.is_sign_positive() && !amount.is_zero());
        let total = positive
            .clone()
            .try_fold(Decimal::ZERO, |total, (category, amount)| {
                total
                    .checked_add(*amount)
                    .ok_or_else(|| Error::AmountOverflow {
                        category: category.clone(),
                    })
            })?;
        if total.is_zero() {
            return Ok(None);
        }
        let mut angle = START_ANGLE;
        let slices = positive
            .map(|(category, amount)| {
                let share = (*amount / total).to_f64().unwrap_or_default();
                let start = angle;
                angle += share * 360.0;
                Slice {
                    category: category.clone(),
                    amount: *amount,
                    share,
                    start,
                    end: angle,
                }
            })
            .collect();
        Ok(Some(Self {
            title: TITLE,
            slices,
        }))
    }

    pub fn to_document(&self) -> Document {
        let title = Text::new()
            .set("x", CENTER.0)
            .set("y", 50.0)
            .set("text-anchor", "middle")
            .set("font-family", "sans-serif")
            .set("font-size", 24.0)
            .add(TextNode::new(self.title));
        let document = Document::new()
            .set("viewBox", (0.0, 0.0, WIDTH, HEIGHT))
            .set("width", WIDTH)
            .set("height", HEIGHT)
            .add(title);
        self.slices
            .iter()
            .enumerate()
            .fold(document, |doc, (i, slice)| {
                let color = COLORS[i % COLORS.len()];
                let doc = if self.slices.len() == 1 {
                    doc.add(
                        Circle::new()
                            .set("cx", CENTER.0)
                            .set("cy", CENTER.1)
                            .set("r", RADIUS)
                            .set("fill", color),
                    )
                } else {
                    doc.add(wedge(slice, color))
                };
                let (lx, ly) = polar(slice.middle(), RADIUS * 1.1);
                let anchor = if lx >= CENTER.0 { "start" } else { "end" };
                let (px, py) = polar(slice.middle(), RADIUS * 0.6);
                doc.add(label(lx, ly, anchor, &slice.category))
                    .add(label(px, py, "middle", &slice.percent()))
            })
    }

    pub fn save(&self, path: &Path) -> std::io::Result<()> {
        svg::save(path, &self.to_document())
    }
}

/// Screen coordinates of the point at `angle` degrees and `radius` from the
/// center. The y axis points down, hence the minus.
fn polar(angle: f64, radius: f64) -> (f64, f64) {
    let rad = angle.to_radians();
    (CENTER.0 + radius * rad.cos(), CENTER.1 - radius * rad.sin())
}

fn wedge(slice: &Slice, color: &str) -> SvgPath {
    let (x1, y1) = polar(slice.start, RADIUS);
    let (x2, y2) = polar(slice.end, RADIUS);
    let large_arc = u8::from(slice.end - slice.start > 180.0);
    // sweep-flag 0 draws the arc counter-clockwise on screen
    let data = format!(
        "M {cx:.3} {cy:.3} L {x1:.3} {y1:.3} A {r} {r} 0 {large_arc} 0 {x2:.3} {y2:.3} Z",
        cx = CENTER.0,
        cy = CENTER.1,
        r = RADIUS,
    );
    SvgPath::new()
        .set("d", data)
        .set("fill", color)
        .set("stroke", "white")
        .set("stroke-width", 1.0)
}

fn label(x: f64, y: f64, anchor: &str, content: &str) -> Text {
    Text::new()
        .set("x", x)
        .set("y", y)
        .set("text-anchor", anchor)
        .set("dominant-baseline", "middle")
        .set("font-family", "sans-serif")
        .set("font-size", 14.0)
        .add(TextNode::new(content))
}

#[cfg(test)]
mod tests {
    use super::{PieChart, START_ANGLE, TITLE};
    use crate::data::{Error, Spending};
    use rust_decimal_macros::dec;

    fn spending(entries: &[(&str, rust_decimal::Decimal)]) -> Spending {
        entries
            .iter()
            .map(|(category, amount)| (category.to_string(), *amount))
            .collect()
    }

    #[test]
    fn test_empty_has_no_chart() {
        assert_eq!(PieChart::from_spending(&Spending::new()).unwrap(), None);
        assert_eq!(
            PieChart::from_spending(&spending(&[("Refund", dec!(-5)), ("Free", dec!(0))]))
                .unwrap(),
            None
        );
    }

    #[test]
    fn test_slices() {
        let chart = PieChart::from_spending(&spending(&[("Food", dec!(15)), ("Rent", dec!(20))]))
            .unwrap()
            .unwrap();
        assert_eq!(chart.title, TITLE);
        assert_eq!(chart.slices.len(), 2);
        let (food, rent) = (&chart.slices[0], &chart.slices[1]);
        assert_eq!(food.category, "Food");
        assert_eq!(food.amount, dec!(15));
        assert_eq!(food.percent(), "42.9%");
        assert_eq!(rent.percent(), "57.1%");
        assert_eq!(food.start, START_ANGLE);
        assert!((food.end - rent.start).abs() < 1e-9);
        assert!((rent.end - (START_ANGLE + 360.0)).abs() < 1e-9);
    }

    #[test]
    fn test_non_positive_totals_are_left_out() {
        let chart = PieChart::from_spending(&spending(&[
            ("Food", dec!(30)),
            ("Refund", dec!(-10)),
            ("Rent", dec!(10)),
        ]))
        .unwrap()
        .unwrap();
        let categories: Vec<_> = chart.slices.iter().map(|s| s.category.as_str()).collect();
        assert_eq!(categories, ["Food", "Rent"]);
        assert_eq!(chart.slices[0].percent(), "75.0%");
    }

    #[test]
    fn test_document_labels() {
        let chart = PieChart::from_spending(&spending(&[("Food", dec!(1)), ("Rent", dec!(3))]))
            .unwrap()
            .unwrap();
        let svg = chart.to_document().to_string();
        assert!(svg.contains(TITLE));
        assert!(svg.contains("Food"));
        assert!(svg.contains("25.0%"));
        assert!(svg.contains("75.0%"));
        assert_eq!(svg.matches("<path").count(), 2);
    }

    #[test]
    fn test_single_category_is_a_full_circle() {
        let chart = PieChart::from_spending(&spending(&[("Rent", dec!(700))]))
            .unwrap()
            .unwrap();
        let svg = chart.to_document().to_string();
        assert!(svg.contains("<circle"));
        assert!(!svg.contains("<path"));
        assert!(svg.contains("100.0%"));
    }

    #[test]
    fn test_total_overflow() {
        let big: rust_decimal::Decimal = "70000000000000000000000000000".parse().unwrap();
        let result = PieChart::from_spending(&spending(&[("Food", big), ("Rent", big)]));
        match result {
            Err(Error::AmountOverflow { category }) => assert_eq!(category, "Rent"),
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
