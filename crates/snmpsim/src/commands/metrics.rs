//! Metrics command handlers.
//!
//! Read-only: processes, their endpoints and console pages, and the
//! packet/message activity counters with their filter vocabularies.

use tabled::Tabled;

use snmpsim_api::{
    Console, MessageMetrics, MetricsClient, PacketMetrics, ProcessEndpoint, ProcessMetrics,
};

use crate::cli::{GlobalOpts, MetricsArgs, MetricsCommand};
use crate::error::CliError;
use crate::output::{self, or_dash};

use super::util;

// ── Table rows ──────────────────────────────────────────────────────

#[derive(Tabled)]
struct ProcessRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Path")]
    path: String,
    #[tabled(rename = "Runtime")]
    runtime: i64,
    #[tabled(rename = "CPU")]
    cpu: i64,
    #[tabled(rename = "Memory")]
    memory: i64,
    #[tabled(rename = "Exits")]
    exits: i64,
    #[tabled(rename = "Host")]
    host: String,
}

impl From<&ProcessMetrics> for ProcessRow {
    fn from(p: &ProcessMetrics) -> Self {
        Self {
            id: p.id,
            path: p.path.clone(),
            runtime: p.runtime,
            cpu: p.cpu,
            memory: p.memory,
            exits: p.exits,
            host: p.supervisor.hostname.clone(),
        }
    }
}

#[derive(Tabled)]
struct EndpointRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Protocol")]
    protocol: String,
    #[tabled(rename = "Address")]
    address: String,
}

impl From<&ProcessEndpoint> for EndpointRow {
    fn from(e: &ProcessEndpoint) -> Self {
        Self {
            id: e.id,
            protocol: e.protocol.clone(),
            address: e.address.clone(),
        }
    }
}

#[derive(Tabled)]
struct ConsoleRow {
    #[tabled(rename = "Page")]
    id: i64,
    #[tabled(rename = "Timestamp")]
    timestamp: String,
    #[tabled(rename = "Lines")]
    lines: usize,
}

impl From<&Console> for ConsoleRow {
    fn from(c: &Console) -> Self {
        Self {
            id: c.id,
            timestamp: c.timestamp.clone(),
            lines: c.text.lines().count(),
        }
    }
}

#[derive(Tabled)]
struct ValueRow {
    #[tabled(rename = "Value")]
    value: String,
}

// ── Detail views ────────────────────────────────────────────────────

fn process_detail(p: &ProcessMetrics) -> String {
    let mut lines = vec![
        format!("ID:              {}", p.id),
        format!("Path:            {}", p.path),
        format!("Runtime:         {}s", p.runtime),
        format!("CPU:             {}", p.cpu),
        format!("Memory:          {}", p.memory),
        format!("Open files:      {}", p.files),
        format!("Exits:           {}", p.exits),
        format!("Changes:         {}", p.changes),
        format!("Update interval: {}s", p.update_interval),
        format!("Last update:     {}", p.last_update),
        format!(
            "Console pages:   {} (last {})",
            p.console_pages.count, p.console_pages.last_update
        ),
        format!("Supervisor:      {}", p.supervisor.hostname),
        format!("Watch dir:       {}", p.supervisor.watch_dir),
    ];
    if let Some(lc) = p.lifecycle {
        lines.push(format!("Lifecycle exits: {}", or_dash(lc.exits)));
        lines.push(format!("Restarts:        {}", or_dash(lc.restarts)));
    }
    lines.join("\n")
}

fn packets_detail(p: &PacketMetrics) -> String {
    [
        format!("First hit:        {}", or_dash(p.first_hit)),
        format!("Last hit:         {}", or_dash(p.last_hit)),
        format!("Total:            {}", or_dash(p.total)),
        format!("Parse failures:   {}", or_dash(p.parse_failures)),
        format!("Auth failures:    {}", or_dash(p.auth_failures)),
        format!("Context failures: {}", or_dash(p.context_failures)),
    ]
    .join("\n")
}

fn messages_detail(m: &MessageMetrics) -> String {
    let mut lines = vec![
        format!("First hit: {}", or_dash(m.first_hit)),
        format!("Last hit:  {}", or_dash(m.last_hit)),
        format!("PDUs:      {}", or_dash(m.pdus)),
        format!("Var-binds: {}", or_dash(m.var_binds)),
        format!("Failures:  {}", or_dash(m.failures)),
    ];
    for v in &m.variations {
        lines.push(format!(
            "Variation {}: total {}, failures {}",
            v.name.as_deref().unwrap_or("?"),
            or_dash(v.total),
            or_dash(v.failures)
        ));
    }
    lines.join("\n")
}

fn render_values(global: &GlobalOpts, values: &[String]) -> Result<(), CliError> {
    let out = output::render_list(
        &global.output,
        values,
        |v| ValueRow { value: v.clone() },
        String::clone,
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    client: &MetricsClient,
    args: MetricsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        MetricsCommand::Processes(list) => {
            let processes = client
                .get_processes(util::filter_from(&list).as_ref())
                .await?;
            let out = output::render_list(
                &global.output,
                &processes,
                |p| ProcessRow::from(p),
                |p| p.id.to_string(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        MetricsCommand::Process { id } => {
            let process = client.get_process(id).await?;
            let out = output::render_single(&global.output, &process, process_detail, |p| {
                p.id.to_string()
            })?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        MetricsCommand::ProcessEndpoints { process, endpoint } => {
            let endpoints = match endpoint {
                Some(endpoint_id) => vec![client.get_process_endpoint(process, endpoint_id).await?],
                None => client.get_process_endpoints(process).await?,
            };
            let out = output::render_list(
                &global.output,
                &endpoints,
                |e| EndpointRow::from(e),
                |e| e.address.clone(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        MetricsCommand::Console { process, page } => {
            if let Some(page_id) = page {
                let page = client.get_process_console_page(process, page_id).await?;
                let out = output::render_single(
                    &global.output,
                    &page,
                    |c| c.text.clone(),
                    |c| c.text.clone(),
                )?;
                output::print_output(&out, global.quiet);
                return Ok(());
            }
            let pages = client.get_process_console_pages(process).await?;
            let out = output::render_list(
                &global.output,
                &pages,
                |c| ConsoleRow::from(c),
                |c| c.id.to_string(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        MetricsCommand::Packets(list) => {
            let packets = client
                .get_packets(util::filter_from(&list).as_ref())
                .await?;
            let out = output::render_single(&global.output, &packets, packets_detail, |p| {
                or_dash(p.total)
            })?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        MetricsCommand::PacketFilters { name } => {
            let values = match name {
                Some(name) => client.get_packet_filter_values(&name).await?,
                None => client.get_packet_filters().await?,
            };
            render_values(global, &values)
        }

        MetricsCommand::Messages(list) => {
            let messages = client
                .get_messages(util::filter_from(&list).as_ref())
                .await?;
            let out = output::render_single(&global.output, &messages, messages_detail, |m| {
                or_dash(m.pdus)
            })?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        MetricsCommand::MessageFilters { name } => {
            let values = match name {
                Some(name) => client.get_message_filter_values(&name).await?,
                None => client.get_message_filters().await?,
            };
            render_values(global, &values)
        }
    }
}

#[cfg(test)]
mod tests {
    use snmpsim_api::Variation;

    use super::*;

    #[test]
    fn unobserved_counters_render_as_dash() {
        let packets = PacketMetrics {
            total: Some(12),
            ..PacketMetrics::default()
        };
        let text = packets_detail(&packets);
        assert!(text.contains("Total:            12"));
        assert!(text.contains("Auth failures:    -"));
    }

    #[test]
    fn variations_are_listed() {
        let messages = MessageMetrics {
            pdus: Some(3),
            variations: vec![Variation {
                name: Some("writecache".into()),
                total: Some(2),
                ..Variation::default()
            }],
            ..MessageMetrics::default()
        };
        let text = messages_detail(&messages);
        assert!(text.contains("Variation writecache: total 2, failures -"));
    }
}
