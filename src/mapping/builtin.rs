use super::NodeTypeMapping;
use std::collections::BTreeMap;

/// Declares the built-in mapping table.
///
/// Each entry reads `source => target { category, color, params, inputs, outputs }`,
/// where `params` renames source parameter keys and `inputs`/`outputs` list the
/// target port names per connection group.
macro_rules! define_node_mappings {
    ( $(
        $source:literal => $target:literal {
            category: $category:literal,
            color: $color:literal,
            params: { $( $param_from:literal => $param_to:literal ),* $(,)? },
            inputs: { $( $in_group:literal => [ $( $in_port:literal ),* $(,)? ] ),* $(,)? },
            outputs: { $( $out_group:literal => [ $( $out_port:literal ),* $(,)? ] ),* $(,)? } $(,)?
        }
    ),* $(,)? ) => {
        pub(super) fn builtin_mappings() -> Vec<NodeTypeMapping> {
            vec![ $(
                NodeTypeMapping {
                    source_type: $source.to_string(),
                    target_type: $target.to_string(),
                    category: $category.to_string(),
                    parameter_mappings: {
                        #[allow(unused_mut)]
                        let mut params = BTreeMap::new();
                        $( params.insert($param_from.to_string(), $param_to.to_string()); )*
                        params
                    },
                    input_mappings: {
                        #[allow(unused_mut)]
                        let mut groups = BTreeMap::new();
                        $( groups.insert($in_group.to_string(), vec![ $( $in_port.to_string() ),* ]); )*
                        groups
                    },
                    output_mappings: {
                        #[allow(unused_mut)]
                        let mut groups = BTreeMap::new();
                        $( groups.insert($out_group.to_string(), vec![ $( $out_port.to_string() ),* ]); )*
                        groups
                    },
                    color: $color.to_string(),
                },
            )* ]
        }
    };
}

define_node_mappings! {
    // Triggers
    "n8n-nodes-base.webhook" => "trigger/webhook" {
        category: "trigger", color: "#4CAF50",
        params: { "path" => "path", "httpMethod" => "method", "responseMode" => "response_mode" },
        inputs: {},
        outputs: { "main" => ["request"] },
    },
    "n8n-nodes-base.scheduleTrigger" => "trigger/schedule" {
        category: "trigger", color: "#4CAF50",
        params: { "rule" => "schedule" },
        inputs: {},
        outputs: { "main" => ["trigger"] },
    },
    "n8n-nodes-base.cron" => "trigger/schedule" {
        category: "trigger", color: "#4CAF50",
        params: { "triggerTimes" => "schedule" },
        inputs: {},
        outputs: { "main" => ["trigger"] },
    },
    "n8n-nodes-base.manualTrigger" => "trigger/manual" {
        category: "trigger", color: "#4CAF50",
        params: {},
        inputs: {},
        outputs: { "main" => ["trigger"] },
    },
    "n8n-nodes-base.start" => "trigger/manual" {
        category: "trigger", color: "#4CAF50",
        params: {},
        inputs: {},
        outputs: { "main" => ["trigger"] },
    },
    "n8n-nodes-base.emailReadImap" => "trigger/email_received" {
        category: "trigger", color: "#4CAF50",
        params: { "mailbox" => "mailbox", "postProcessAction" => "post_process" },
        inputs: {},
        outputs: { "main" => ["email"] },
    },

    // Actions
    "n8n-nodes-base.httpRequest" => "action/http_request" {
        category: "action", color: "#2196F3",
        params: {
            "url" => "url",
            "method" => "method",
            "requestMethod" => "method",
            "authentication" => "auth_type",
            "headerParameters" => "headers",
            "queryParameters" => "query",
            "bodyParameters" => "body",
            "jsonBody" => "body",
            "options" => "options",
        },
        inputs: { "main" => ["input"] },
        outputs: { "main" => ["response"] },
    },
    "n8n-nodes-base.respondToWebhook" => "action/http_response" {
        category: "action", color: "#2196F3",
        params: { "respondWith" => "respond_with", "responseBody" => "body", "options" => "options" },
        inputs: { "main" => ["input"] },
        outputs: { "main" => ["output"] },
    },
    "n8n-nodes-base.emailSend" => "action/send_email" {
        category: "action", color: "#2196F3",
        params: {
            "fromEmail" => "from",
            "toEmail" => "to",
            "ccEmail" => "cc",
            "subject" => "subject",
            "text" => "body",
            "html" => "html_body",
        },
        inputs: { "main" => ["input"] },
        outputs: { "main" => ["result"] },
    },
    "n8n-nodes-base.gmail" => "action/send_email" {
        category: "action", color: "#2196F3",
        params: { "sendTo" => "to", "subject" => "subject", "message" => "body", "operation" => "operation" },
        inputs: { "main" => ["input"] },
        outputs: { "main" => ["result"] },
    },
    "n8n-nodes-base.executeWorkflow" => "action/subworkflow" {
        category: "action", color: "#2196F3",
        params: { "workflowId" => "workflow_id", "source" => "source" },
        inputs: { "main" => ["input"] },
        outputs: { "main" => ["output"] },
    },

    // Transforms
    "n8n-nodes-base.code" => "transform/code" {
        category: "transform", color: "#FF9800",
        params: { "jsCode" => "code", "pythonCode" => "code", "language" => "language", "mode" => "mode" },
        inputs: { "main" => ["input"] },
        outputs: { "main" => ["output"] },
    },
    "n8n-nodes-base.function" => "transform/code" {
        category: "transform", color: "#FF9800",
        params: { "functionCode" => "code" },
        inputs: { "main" => ["input"] },
        outputs: { "main" => ["output"] },
    },
    "n8n-nodes-base.set" => "transform/set_variable" {
        category: "transform", color: "#FF9800",
        params: { "values" => "values", "assignments" => "values", "keepOnlySet" => "keep_only_set" },
        inputs: { "main" => ["input"] },
        outputs: { "main" => ["output"] },
    },
    "n8n-nodes-base.itemLists" => "transform/list" {
        category: "transform", color: "#FF9800",
        params: { "operation" => "operation", "fieldToSplitOut" => "field" },
        inputs: { "main" => ["input"] },
        outputs: { "main" => ["output"] },
    },

    // Logic
    "n8n-nodes-base.if" => "logic/condition" {
        category: "logic", color: "#9C27B0",
        params: { "conditions" => "conditions", "combineOperation" => "combinator" },
        inputs: { "main" => ["input"] },
        outputs: { "main" => ["true", "false"] },
    },
    "n8n-nodes-base.switch" => "logic/switch" {
        category: "logic", color: "#9C27B0",
        params: { "mode" => "mode", "rules" => "rules", "dataType" => "data_type", "value1" => "value" },
        inputs: { "main" => ["input"] },
        outputs: { "main" => ["output_0", "output_1", "output_2", "output_3"] },
    },
    "n8n-nodes-base.merge" => "logic/merge" {
        category: "logic", color: "#9C27B0",
        params: { "mode" => "mode", "joinMode" => "join_mode" },
        inputs: { "main" => ["input_a", "input_b"] },
        outputs: { "main" => ["output"] },
    },
    "n8n-nodes-base.splitInBatches" => "logic/loop" {
        category: "logic", color: "#9C27B0",
        params: { "batchSize" => "batch_size" },
        inputs: { "main" => ["input"] },
        outputs: { "main" => ["done", "loop"] },
    },
    "n8n-nodes-base.wait" => "logic/delay" {
        category: "logic", color: "#9C27B0",
        params: { "amount" => "amount", "unit" => "unit", "resume" => "resume" },
        inputs: { "main" => ["input"] },
        outputs: { "main" => ["output"] },
    },
    "n8n-nodes-base.noOp" => "logic/passthrough" {
        category: "logic", color: "#9C27B0",
        params: {},
        inputs: { "main" => ["input"] },
        outputs: { "main" => ["output"] },
    },

    // Integrations
    "n8n-nodes-base.slack" => "integration/slack" {
        category: "integration", color: "#4A154B",
        params: { "channel" => "channel", "channelId" => "channel", "text" => "message", "resource" => "resource", "operation" => "operation" },
        inputs: { "main" => ["input"] },
        outputs: { "main" => ["result"] },
    },
    "n8n-nodes-base.telegram" => "integration/telegram" {
        category: "integration", color: "#0088CC",
        params: { "chatId" => "chat_id", "text" => "message", "operation" => "operation" },
        inputs: { "main" => ["input"] },
        outputs: { "main" => ["result"] },
    },
    "n8n-nodes-base.discord" => "integration/discord" {
        category: "integration", color: "#5865F2",
        params: { "webhookUri" => "webhook_url", "text" => "message" },
        inputs: { "main" => ["input"] },
        outputs: { "main" => ["result"] },
    },
    "n8n-nodes-base.googleSheets" => "integration/google_sheets" {
        category: "integration", color: "#0F9D58",
        params: { "documentId" => "sheet_id", "sheetId" => "sheet_id", "sheetName" => "sheet_name", "range" => "range", "operation" => "operation" },
        inputs: { "main" => ["input"] },
        outputs: { "main" => ["rows"] },
    },

    // Data
    "n8n-nodes-base.postgres" => "data/database_query" {
        category: "data", color: "#795548",
        params: { "operation" => "operation", "query" => "query", "table" => "table", "schema" => "schema" },
        inputs: { "main" => ["input"] },
        outputs: { "main" => ["rows"] },
    },
    "n8n-nodes-base.mySql" => "data/database_query" {
        category: "data", color: "#795548",
        params: { "operation" => "operation", "query" => "query", "table" => "table" },
        inputs: { "main" => ["input"] },
        outputs: { "main" => ["rows"] },
    },
    "n8n-nodes-base.mongoDb" => "data/database_query" {
        category: "data", color: "#795548",
        params: { "operation" => "operation", "collection" => "collection", "query" => "query" },
        inputs: { "main" => ["input"] },
        outputs: { "main" => ["rows"] },
    },
    "n8n-nodes-base.redis" => "data/cache" {
        category: "data", color: "#795548",
        params: { "operation" => "operation", "key" => "key", "value" => "value", "expire" => "ttl" },
        inputs: { "main" => ["input"] },
        outputs: { "main" => ["result"] },
    },
    "n8n-nodes-base.readBinaryFile" => "data/file_read" {
        category: "data", color: "#795548",
        params: { "filePath" => "path", "dataPropertyName" => "property" },
        inputs: { "main" => ["input"] },
        outputs: { "main" => ["content"] },
    },
    "n8n-nodes-base.writeBinaryFile" => "data/file_write" {
        category: "data", color: "#795548",
        params: { "fileName" => "path", "dataPropertyName" => "property" },
        inputs: { "main" => ["input"] },
        outputs: { "main" => ["result"] },
    },

    // AI
    "n8n-nodes-base.openAi" => "ai/chat_completion" {
        category: "ai", color: "#10A37F",
        params: { "model" => "model", "prompt" => "prompt", "temperature" => "temperature", "maxTokens" => "max_tokens" },
        inputs: { "main" => ["input"] },
        outputs: { "main" => ["completion"] },
    },
    "@n8n/n8n-nodes-langchain.lmChatOpenAi" => "ai/chat_completion" {
        category: "ai", color: "#10A37F",
        params: { "model" => "model", "options" => "options" },
        inputs: {},
        outputs: { "ai_languageModel" => ["model"] },
    },
    "@n8n/n8n-nodes-langchain.agent" => "ai/agent" {
        category: "ai", color: "#10A37F",
        params: { "text" => "prompt", "promptType" => "prompt_type", "options" => "options" },
        inputs: { "ai_languageModel" => ["model"], "ai_memory" => ["memory"], "ai_tool" => ["tools"], "main" => ["input"] },
        outputs: { "main" => ["output"] },
    },
}
