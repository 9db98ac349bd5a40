use patrimonio_api::Asset;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    println!("Import file: a JSON array of records shaped like this:");
    println!("======================================================");

    let schema = schemars::schema_for!(Asset);
    println!("{}", serde_json::to_string_pretty(&schema)?);

    println!("\nHeader aliases accepted on import:");
    println!("  assetId     : patrimonio, tombamento, tombo, plaqueta");
    println!("  description : descricao, denominacao");
    println!("  category    : categoria, classe");
    println!("  value       : valor, valor aquisicao");
    println!("  uorg        : unidade, destination unit");
    println!("  group       : grupo, uorg group, destination group");
    println!("  site        : local, localizacao");
    Ok(())
}
