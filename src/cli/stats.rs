use super::context::AppContext;
use urbanplan::proposals::summary::{district_occupancy, first_in_district};
use urbanplan::proposals::{District, Proposal, Tally};

/// Districts per row of the city map
const MAP_COLUMNS: usize = 4;

/// Print status counts and the district map
pub async fn execute(
    config: Option<String>,
    log_level: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let ctx = AppContext::load(config.as_deref(), log_level.as_deref(), None)?;
    let proposals = ctx.repository.list_all().await?;

    let tally = Tally::from_proposals(&proposals);
    println!("📊 Proposals");
    println!("   Total:    {}", tally.total);
    println!("   Pending:  {}", tally.pending);
    println!("   Approved: {}", tally.approved);
    println!("   Rejected: {}", tally.rejected);
    println!();
    println!("🗺  District map");
    print!("{}", render_map(&proposals));

    let featured: Vec<String> = District::all()
        .filter_map(|d| first_in_district(&proposals, d).map(|p| (d, p)))
        .map(|(d, p)| format!("   {:<12} {} ({})", d.label(), p.title, p.status))
        .collect();
    if !featured.is_empty() {
        println!();
        println!("Latest per district:");
        for line in featured {
            println!("{}", line);
        }
    }

    Ok(())
}

/// 4x4 grid of `D<n>:<count>` cells.
pub fn render_map(proposals: &[Proposal]) -> String {
    let counts = district_occupancy(proposals);
    let mut out = String::new();

    for (row_index, cells) in counts.chunks(MAP_COLUMNS).enumerate() {
        out.push_str("   ");
        for (col, count) in cells.iter().enumerate() {
            let number = row_index * MAP_COLUMNS + col + 1;
            out.push_str(&format!("{:>8}", format!("D{}:{}", number, count)));
        }
        out.push('\n');
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use urbanplan::proposals::ProposalStatus;

    fn proposal(district: u8) -> Proposal {
        Proposal {
            id: format!("prop-{}", district),
            encoded_votes: "FHE-MQ==".to_string(),
            created_at: 1,
            owner: "0xowner".to_string(),
            location: District::new(district).unwrap(),
            status: ProposalStatus::Pending,
            title: "t".to_string(),
            description: String::new(),
        }
    }

    #[test]
    fn test_render_empty_map() {
        let map = render_map(&[]);
        let rows: Vec<&str> = map.lines().collect();

        assert_eq!(rows.len(), 4);
        assert!(rows[0].contains("D1:0"));
        assert!(rows[3].contains("D16:0"));
    }

    #[test]
    fn test_render_map_counts() {
        let map = render_map(&[proposal(5), proposal(5), proposal(16)]);

        assert!(map.lines().nth(1).unwrap().contains("D5:2"));
        assert!(map.lines().nth(3).unwrap().contains("D16:1"));
    }
}
