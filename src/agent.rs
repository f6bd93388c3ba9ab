//! Run driver and the agents it drives.
//!
//! The driver owns step numbering and the scenario allow-list; agents only
//! decide which tools to call with which arguments.

use std::time::Instant;

use serde_json::{Value, json};

use crate::domain::{Event, GateVerdict, Scenario};
use crate::error::{ReplayError, Result};
use crate::runlog::Recorder;
use crate::tools::ToolExecutor;

/// Default page the research agent starts from
pub const DEFAULT_TOPIC_URL: &str = "http://example.com/topic";

/// Decides which tools to call during a run
pub trait Agent {
    fn run(&self, driver: &mut RunDriver<'_>) -> Result<()>;
}

/// Drives one run: numbers steps, enforces the allow-list, counts calls.
pub struct RunDriver<'a> {
    executor: ToolExecutor<'a>,
    recorder: &'a Recorder,
    scenario: &'a Scenario,
    step: u64,
    tool_calls: u32,
}

impl<'a> RunDriver<'a> {
    pub fn new(executor: ToolExecutor<'a>, recorder: &'a Recorder, scenario: &'a Scenario) -> Self {
        Self {
            executor,
            recorder,
            scenario,
            step: 0,
            tool_calls: 0,
        }
    }

    /// Run `agent` between a run_start and a run_end event. Returns the latency in ms.
    pub fn drive(&mut self, agent: &dyn Agent) -> Result<u64> {
        let started = Instant::now();
        self.recorder
            .log(&Event::run_start(self.recorder.run_id(), self.step, &self.scenario.id))?;
        log::info!(
            "Run {} started: scenario={} mode={}",
            self.recorder.run_id(),
            self.scenario.id,
            self.executor.mode()
        );

        agent.run(self)?;

        let latency_ms = started.elapsed().as_millis() as u64;
        self.recorder.log(&Event::run_end(
            self.recorder.run_id(),
            self.step,
            self.tool_calls,
            latency_ms,
        ))?;
        log::info!(
            "Run {} finished: tool_calls={} latency_ms={}",
            self.recorder.run_id(),
            self.tool_calls,
            latency_ms
        );
        Ok(latency_ms)
    }

    /// Call a tool permitted by the scenario. Uses two steps: call, then result.
    pub fn call_tool(&mut self, tool_name: &str, args: Value) -> Result<Value> {
        if !self.scenario.allows(tool_name) {
            return Err(ReplayError::ToolNotAllowed(tool_name.to_string()));
        }

        self.step += 1;
        let result = self.executor.execute(tool_name, &args, self.step)?;
        self.tool_calls += 1;
        self.step += 1;
        Ok(result)
    }

    /// Log an agent_note at the current step
    pub fn note(&self, note: &str) -> Result<()> {
        self.recorder
            .log(&Event::agent_note(self.recorder.run_id(), self.step, note))
    }

    /// Evaluate the call-count gate and log gate_result after the last step
    pub fn evaluate_gate(&self) -> Result<GateVerdict> {
        let verdict = GateVerdict::max_tool_calls(self.tool_calls, self.scenario.assertions.max_tool_calls);
        let event = verdict.to_event(self.recorder.run_id(), self.step + 1);
        self.recorder.log(&event)?;
        log::info!(
            "Gate {}: passed={} observed={} limit={}",
            verdict.gate,
            verdict.passed,
            verdict.observed,
            verdict.limit
        );
        Ok(verdict)
    }

    pub fn step(&self) -> u64 {
        self.step
    }

    pub fn tool_calls(&self) -> u32 {
        self.tool_calls
    }

    pub fn scenario(&self) -> &Scenario {
        self.scenario
    }
}

/// Fetch, summarize, draft. Each step consumes the previous step's output.
pub struct ResearchAgent {
    pub topic_url: String,
}

impl Default for ResearchAgent {
    fn default() -> Self {
        Self {
            topic_url: DEFAULT_TOPIC_URL.to_string(),
        }
    }
}

impl Agent for ResearchAgent {
    fn run(&self, driver: &mut RunDriver<'_>) -> Result<()> {
        let page = driver.call_tool("web_fetch", json!({ "url": self.topic_url }))?;
        let summary = driver.call_tool("summarize", json!({ "text": text_of(&page) }))?;
        driver.call_tool("write_draft", json!({ "summary": text_of(&summary) }))?;
        Ok(())
    }
}

fn text_of(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
