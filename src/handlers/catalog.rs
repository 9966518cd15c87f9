use crate::catalog::{self, OPERATING_SYSTEMS};
use crate::model::{CloudProvider, SecurityGroup};
use colored::Colorize;
use serde_json::{Value, json};

fn provider_json(provider: CloudProvider) -> Value {
    let types: Vec<Value> = catalog::instance_types_for(provider)
        .iter()
        .map(|t| {
            json!({
                "id": t.id,
                "vcpu": t.vcpu,
                "memory_gb": t.memory_gb,
                "monthly_price": t.monthly_price,
            })
        })
        .collect();
    let regions: Vec<Value> = catalog::regions_for(provider)
        .iter()
        .map(|r| json!({ "id": r.id, "name": r.name }))
        .collect();
    json!({
        "provider": provider,
        "name": provider.display_name(),
        "instance_types": types,
        "regions": regions,
    })
}

/// Whole catalog as JSON, optionally limited to one provider
pub fn catalog_json(provider: Option<CloudProvider>) -> Value {
    let providers: Vec<Value> = CloudProvider::all()
        .iter()
        .filter(|p| provider.is_none_or(|only| only == **p))
        .map(|p| provider_json(*p))
        .collect();
    let images: Vec<Value> = OPERATING_SYSTEMS
        .iter()
        .map(|os| json!({ "id": os.id, "name": os.name }))
        .collect();
    let groups: Vec<Value> = SecurityGroup::all()
        .iter()
        .map(|g| json!({ "id": g, "label": g.label(), "ports": g.ports() }))
        .collect();
    json!({
        "providers": providers,
        "operating_systems": images,
        "security_groups": groups,
    })
}

pub fn handle_catalog(provider: Option<CloudProvider>, json: bool) -> crate::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(&catalog_json(provider))?);
        return Ok(());
    }

    for p in CloudProvider::all()
        .iter()
        .filter(|p| provider.is_none_or(|only| only == **p))
    {
        println!("\n{} {}", p.display_name().bold(), format!("({})", p).dimmed());
        println!("  {}", p.description().dimmed());
        for t in catalog::instance_types_for(*p) {
            println!("  {} {}", "▸".cyan(), t.label());
        }
        let regions = catalog::regions_for(*p);
        if !regions.is_empty() {
            println!("  {}", "Regions:".dimmed());
            for r in regions {
                println!("    {:<16} {}", r.id, r.name.dimmed());
            }
        }
    }

    println!("\n{}", "Operating systems".bold());
    for os in OPERATING_SYSTEMS {
        println!("  {:<14} {}", os.id, os.name.dimmed());
    }

    println!("\n{}", "Security groups".bold());
    for g in SecurityGroup::all() {
        let ports: Vec<String> = g.ports().iter().map(u16::to_string).collect();
        println!(
            "  {:<8} {}  {}",
            g.as_str(),
            g.label(),
            format!("ports {}", ports.join(", ")).dimmed()
        );
    }
    println!();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_json_filter() {
        let all = catalog_json(None);
        assert_eq!(all["providers"].as_array().unwrap().len(), 3);

        let gcp = catalog_json(Some(CloudProvider::Gcp));
        let providers = gcp["providers"].as_array().unwrap();
        assert_eq!(providers.len(), 1);
        assert_eq!(providers[0]["instance_types"][0]["id"], "e2-micro");
        assert_eq!(gcp["security_groups"][0]["ports"], json!([80, 443, 22]));
    }
}
