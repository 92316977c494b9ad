use std::thread;
use serde::Serialize;
use tracing::{debug, error, instrument};
use binlog::events::binlog_event::BinlogEvent;
use binlog::events::log_context::ILogContext;
use binlog::events::log_position::LogFilePosition;
use common::config::BinlogConfig;
use common::err::CResult;
use common::err::decode_error::ReError;
use common::pretty_util::{to_bytes_len_pretty, to_duration_pretty, to_string_pretty, Format};
use crate::binlog::binlog_events_wrapper::BinlogEventsWrapper;
use crate::conn::binlog_connection::{BinlogConnection, IBinlogConnection};
use crate::conn::connection::IConnection;
use crate::conn::connection_options::ConnectionOptions;
use crate::env_options::EnvOptions;

/// Binlog subscriber, driven through a fixed sequence of calls:
///
///   setup ----> start  -----> binlogs   ---->  pause
#[derive(Debug)]
pub struct BinlogSubscribe {
    debug: bool,

    conn: Option<BinlogConnection>,

    binlog_config: BinlogConfig,
    subscribe_options: SubscribeOptions,
}

#[derive(Debug, Clone, Serialize)]
pub struct SubscribeOptions {
    debug: bool,

    print_logs: bool,

    format: Format,
}

impl BinlogSubscribe {
    pub fn new(debug: bool, binlog_config: BinlogConfig, subscribe_options: SubscribeOptions) -> Self {
        BinlogSubscribe {
            debug,
            conn: None,
            binlog_config,
            subscribe_options,
        }
    }

    #[instrument]
    pub fn setup(&mut self, binlog_config: &BinlogConfig) -> CResult<()> {
        let mut opts = ConnectionOptions::new(
            binlog_config.get_host(),
            binlog_config.get_port() as i16,
            binlog_config.username.clone(),
            binlog_config.password.clone(),
        );
        opts.set_env(EnvOptions::new(self.debug, false));

        let binlog_conn = BinlogConnection::new(&opts);
        self.conn = Some(binlog_conn);

        Ok(())
    }

    #[instrument]
    pub fn start(&mut self) -> CResult<()> {
        match self.conn.as_mut().unwrap().try_connect() {
            Ok(_) => {
                debug!("connected to upstream, starting subscription");
                Ok(())
            }
            Err(err) => {
                error!(
                    "failed to connect to {}:{}",
                    self.binlog_config.get_host(),
                    self.binlog_config.get_port()
                );
                Err(err)
            }
        }
    }

    #[instrument]
    pub fn binlogs(&mut self) -> CResult<BinlogEventsWrapper> {
        let events = self.conn.as_mut().unwrap().binlog().map_err(|e| {
            error!("get binlog events error: {:?}", &e);
            e
        })?;

        Ok(BinlogEventsWrapper::new(std::sync::Arc::new(
            std::cell::RefCell::new(events),
        )))
    }

    pub fn pause(&mut self) -> CResult<()> {
        Err(ReError::String("pause is not yet supported".to_string()))
    }

    /// Number of binlog events processed so far.
    pub fn load_read_ptr(&self) -> u64 {
        self.conn.as_ref().unwrap().get_log_context().borrow().load_read_ptr()
    }

    pub fn get_log_position(&self) -> LogFilePosition {
        self.conn.as_ref().unwrap().get_log_context().borrow().get_log_position()
    }

    pub fn get_binlog_config(&self) -> BinlogConfig {
        self.binlog_config.clone()
    }

    pub fn binlog_subscribe_start(&mut self, binlog_config: &BinlogConfig) -> CResult<()> {
        self.setup(binlog_config)?;
        self.start()?;

        debug!("waiting 500ms before draining the binlog stream");
        thread::sleep(std::time::Duration::from_millis(500));

        let mut binlogs_wrapper = self.binlogs()?;
        for x in binlogs_wrapper.get_iter() {
            if let Ok(list) = x {
                for e in list {
                    let event_type = BinlogEvent::get_type_name(&e);

                    if self.subscribe_options.is_debug() {
                        let log_pos = self.get_log_position();
                        println!(
                            "[{:?} {}], pos {} in {} \n{:?}\n",
                            event_type,
                            self.load_read_ptr(),
                            log_pos.get_position(),
                            log_pos.get_file_name(),
                            to_string_pretty(&self.subscribe_options.get_format(), &e)
                        );
                    } else if self.subscribe_options.is_print_logs() {
                        let log_pos = self.get_log_position();
                        println!(
                            "[{:?} {}], pos {} in {}\n",
                            event_type,
                            self.load_read_ptr(),
                            log_pos.get_position(),
                            log_pos.get_file_name()
                        );
                    }
                }
            }
        }

        if let Some(during) = binlogs_wrapper.get_during_time() {
            println!(
                "binlog read complete, elapsed {}, received {} bytes total.",
                to_duration_pretty(&during),
                to_bytes_len_pretty(binlogs_wrapper.get_receives_bytes())
            );
        }

        Ok(())
    }
}

impl Default for SubscribeOptions {
    fn default() -> Self {
        SubscribeOptions::new(false, false, Format::None)
    }
}

impl SubscribeOptions {
    pub fn new(debug: bool, print_logs: bool, format: Format) -> Self {
        SubscribeOptions {
            debug,
            print_logs,
            format,
        }
    }

    pub fn is_print_logs(&self) -> bool {
        self.print_logs
    }

    pub fn is_debug(&self) -> bool {
        self.debug
    }

    pub fn get_format(&self) -> Format {
        self.format.clone()
    }
}
