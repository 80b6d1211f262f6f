use anyhow::Result;

use ilerai_server::Runtime;

pub fn print(runtime: &Runtime) -> Result<()> {
    let info = runtime.engine.service_info();
    println!("{}", serde_json::to_string_pretty(&info)?);
    Ok(())
}
