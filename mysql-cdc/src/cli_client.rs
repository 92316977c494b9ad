use std::fmt::Debug;
use common::config::BinlogConfig;
use common::err::CResult;
use connection::binlog::binlog_subscribe::BinlogSubscribe;
use crate::cli_options::CliOptions;

#[derive(Debug)]
pub struct CliClient {
    binlog_config: BinlogConfig,

    binlog_subscribe: BinlogSubscribe,
}

impl CliClient {
    pub fn new(cli_options: CliOptions, binlog_config: BinlogConfig) -> Self {
        let binlog_subscribe = BinlogSubscribe::new(
            cli_options.is_debug(),
            binlog_config.clone(),
            cli_options.to_subscribe_options(),
        );

        CliClient {
            binlog_config,
            binlog_subscribe,
        }
    }

    pub fn start(&mut self) -> CResult<()> {
        println!("CliClient start");

        self.binlog_subscribe.binlog_subscribe_start(&self.binlog_config)?;

        let log_pos = self.binlog_subscribe.get_log_position();
        println!(
            "load_read_ptr: [{}], pos {} in {}",
            self.binlog_subscribe.load_read_ptr(),
            log_pos.get_position(),
            log_pos.get_file_name()
        );

        Ok(())
    }
}
