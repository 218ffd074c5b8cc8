use crate::{Domain, LinearExpr, Model, Objective, Sense};
use std::io::Write;

/// Write `model` in CPLEX LP format.
///
/// Variables and constraints are emitted under positional names (`x0`, `c0`,
/// ...) because model names are free-form text; the model's own names follow as
/// comments. Hierarchical objectives use the multi-objective section syntax
/// understood by Gurobi.
pub fn export_lp(model: &Model, buffer: &mut impl Write) -> Result<(), std::io::Error> {
    // LP is a line-based format; see
    // https://www.ibm.com/docs/en/icos/22.1.2?topic=cplex-lp-file-format-algebraic-representation
    writeln!(buffer, "\\ Model: {}", model.name())?;
    for (index, var) in model.variables().iter().enumerate() {
        writeln!(buffer, "\\ x{index} = {}", var.name)?;
    }
    for (index, row) in model.constraints().iter().enumerate() {
        writeln!(buffer, "\\ c{index} = {}", row.name)?;
    }

    match model.objective() {
        Some(Objective::Single { expr, sense }) => {
            writeln!(buffer, "{}", sense_keyword(*sense))?;
            writeln!(buffer, " obj: {}", format_expr(expr))?;
        }
        Some(Objective::Hierarchical { sense, terms }) => {
            writeln!(buffer, "{} multi-objectives", sense_keyword(*sense))?;
            for term in terms.iter() {
                writeln!(
                    buffer,
                    " {}: Priority={} Weight={} AbsTol={} RelTol={}",
                    sanitize(&term.name),
                    term.priority,
                    term.scale(*sense),
                    term.abs_tol,
                    term.rel_tol
                )?;
                writeln!(buffer, "  {}", format_expr(&term.expr))?;
            }
        }
        // an LP file needs an objective section, even an empty one
        None => {
            writeln!(buffer, "Minimize")?;
            writeln!(buffer, " obj:")?;
        }
    }

    writeln!(buffer, "Subject To")?;
    for (index, row) in model.constraints().iter().enumerate() {
        writeln!(
            buffer,
            " c{index}: {} {} {}",
            format_expr(&row.expr),
            row.relation,
            row.bound
        )?;
    }

    writeln!(buffer, "Bounds")?;
    for (index, var) in model.variables().iter().enumerate() {
        if var.upper.is_finite() {
            writeln!(buffer, " {} <= x{index} <= {}", var.lower, var.upper)?;
        } else {
            writeln!(buffer, " x{index} >= {}", var.lower)?;
        }
    }

    let integers = model
        .variables()
        .iter()
        .enumerate()
        .filter(|(_, var)| var.domain == Domain::Integer)
        .map(|(index, _)| format!("x{index}"))
        .collect::<Vec<_>>();
    if !integers.is_empty() {
        writeln!(buffer, "General")?;
        writeln!(buffer, " {}", integers.join(" "))?;
    }

    writeln!(buffer, "End")?;
    Ok(())
}

fn sense_keyword(sense: Sense) -> &'static str {
    match sense {
        Sense::Minimize => "Minimize",
        Sense::Maximize => "Maximize",
    }
}

fn format_expr(expr: &LinearExpr) -> String {
    let mut out = String::new();
    for (position, &(var, coef)) in expr.terms().iter().enumerate() {
        let sign = if coef < 0.0 { "-" } else { "+" };
        if position == 0 {
            if coef < 0.0 {
                out.push_str("- ");
            }
        } else {
            out.push(' ');
            out.push_str(sign);
            out.push(' ');
        }
        out.push_str(&format!("{} x{}", coef.abs(), var.index()));
    }
    out
}

// objective names are written verbatim, so strip anything the format reserves
fn sanitize(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '.' {
                c
            } else {
                '_'
            }
        })
        .collect()
}
