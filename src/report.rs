//! Plain-text tables of solved forces.

use std::fmt::Write;

use crate::solution::Solution;

/// Render one line per beam, ascending by id, with the axial force to three decimals.
///
/// Negative values (compression) carry a minus sign and positive values a
/// leading space, so the columns stay aligned.
///
/// # Examples
/// ```
/// use nalgebra::DVector;
/// use trusseq::{force, point, render_forces, BeamId, JointId, Solution, Support, TrussBuilder, UnknownLayout};
///
/// let mut builder = TrussBuilder::new();
/// builder.add_joint(JointId(1), point(0.0, 0.0), force(0.0, 0.0), Support::Free)?;
/// builder.add_joint(JointId(2), point(1.0, 0.0), force(0.0, 0.0), Support::Free)?;
/// builder.add_beam(BeamId(1), JointId(1), JointId(2))?;
/// let layout = UnknownLayout::of(&builder.build()?);
/// let solution = Solution::unpack(&layout, DVector::from_vec(vec![2.5]));
/// assert!(render_forces(&solution).ends_with("    1      -2.500\n"));
/// # Ok::<(), trusseq::TopologyError>(())
/// ```
#[must_use]
pub fn render_forces(solution: &Solution) -> String {
    let mut output = String::new();
    output.push_str(" Beam       Force\n");
    output.push_str("-----------------\n");
    for (beam, &value) in solution.beam_forces() {
        writeln!(&mut output, "{beam:>5}  {}", signed(value))
            .expect("writing to string cannot fail");
    }
    output
}

/// Render one line per support joint, ascending by id, with both reaction components.
#[must_use]
pub fn render_reactions(solution: &Solution) -> String {
    let mut output = String::new();
    output.push_str("Joint          Rx          Ry\n");
    output.push_str("-----------------------------\n");
    for (joint, reaction) in solution.reactions() {
        writeln!(
            &mut output,
            "{joint:>5}  {}  {}",
            signed(reaction.x),
            signed(reaction.y)
        )
        .expect("writing to string cannot fail");
    }
    output
}

/// Format `value` to three decimals in a ten character column, sign first.
///
/// Values that round to zero are printed unsigned.
fn signed(value: f64) -> String {
    let rounded = format!("{:.3}", value.abs());
    let negative =
        value.is_sign_negative() && rounded.bytes().any(|digit| matches!(digit, b'1'..=b'9'));
    let sign = if negative { '-' } else { ' ' };
    format!("{:>10}", format!("{sign}{rounded}"))
}

#[cfg(test)]
mod tests {
    use nalgebra::DVector;

    use super::*;
    use crate::equilibrium::UnknownLayout;
    use crate::geometry::{force, point};
    use crate::truss::{BeamId, JointId, Support, TrussBuilder};

    fn solution(unknowns: Vec<f64>) -> Solution {
        let mut builder = TrussBuilder::new();
        builder
            .add_joint(JointId(1), point(0.0, 0.0), force(0.0, 0.0), Support::Pinned)
            .expect("joint accepted");
        builder
            .add_joint(JointId(2), point(2.0, 0.0), force(0.0, 0.0), Support::Free)
            .expect("joint accepted");
        builder
            .add_joint(JointId(3), point(1.0, 1.0), force(0.0, 0.0), Support::Free)
            .expect("joint accepted");
        for (id, a, b) in [(1, 1, 2), (2, 2, 3), (10, 3, 1)] {
            builder
                .add_beam(BeamId(id), JointId(a), JointId(b))
                .expect("beam accepted");
        }
        let layout = UnknownLayout::of(&builder.build().expect("valid truss"));
        Solution::unpack(&layout, DVector::from_vec(unknowns))
    }

    #[test]
    fn formats_forces_in_ascending_beam_order() {
        let report = render_forces(&solution(vec![-6.0092, 12.5, 0.0, 1.0, -2.0]));
        let lines: Vec<&str> = report.lines().collect();
        assert_eq!(lines[0], " Beam       Force");
        assert_eq!(lines[2], "    1       6.009");
        assert_eq!(lines[3], "    2     -12.500");
        assert_eq!(lines[4], "   10       0.000");
        assert_eq!(lines.len(), 5);
    }

    #[test]
    fn negative_zero_prints_unsigned() {
        assert_eq!(signed(-0.0), "     0.000");
        assert_eq!(signed(-0.0004), "     0.000");
        assert_eq!(signed(-0.0006), "    -0.001");
    }

    #[test]
    fn formats_reactions_per_support() {
        let report = render_reactions(&solution(vec![0.0, 0.0, 0.0, 1.25, -2.0]));
        let lines: Vec<&str> = report.lines().collect();
        assert_eq!(lines[2], "    1       1.250      -2.000");
        assert_eq!(lines.len(), 3);
    }
}
