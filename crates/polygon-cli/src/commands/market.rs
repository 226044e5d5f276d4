/*
 *
 *
 *
 *
 * MIT License
 * Copyright (c) 2025. Dwight J. Browne
 * dwight[-at-]dwightjbrowne[-dot-]com
 *
 *
 * Permission is hereby granted, free of charge, to any person obtaining a copy
 * of this software and associated documentation files (the "Software"), to deal
 * in the Software without restriction, including without limitation the rights
 * to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
 * copies of the Software, and to permit persons to whom the Software is
 * furnished to do so, subject to the following conditions:
 *
 * The above copyright notice and this permission notice shall be included in all
 * copies or substantial portions of the Software.
 *
 * THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
 * IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
 * FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
 * AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
 * LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
 * OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
 * SOFTWARE.
 */

use anyhow::Result;
use clap::Args;
use polygon_client::PolygonClient;
use polygon_core::types::AssetClass;
use polygon_core::Config;

#[derive(Args, Debug)]
pub struct MarketCommand {
  /// Print the raw response as JSON
  #[arg(long)]
  json: bool,
}

pub async fn execute(cmd: MarketCommand, config: Config) -> Result<()> {
  let client = PolygonClient::new(config)?;
  let status = client.market().status().await?;

  if cmd.json {
    println!("{}", serde_json::to_string_pretty(&status)?);
    return Ok(());
  }

  println!("server time: {}", status.server_time);
  for asset in [AssetClass::Stocks, AssetClass::Crypto, AssetClass::Forex] {
    println!("{:<8} {:?}", asset.to_string(), status.state_for(asset));
  }
  println!(
    "exchanges: nyse {:?}, nasdaq {:?}, otc {:?}",
    status.exchanges.nyse, status.exchanges.nasdaq, status.exchanges.otc
  );

  Ok(())
}
