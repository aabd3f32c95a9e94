//! Minimal WSDL 1.1 reader.
//!
//! Only what a document/literal SOAP call needs is extracted: the target
//! namespace, the SOAP endpoint address, and for every operation its
//! `soapAction` and the names of its input parameters as declared in the
//! embedded XML Schema.

use crate::utils::error::{DemoError, Result};
use quick_xml::events::{BytesStart, Event};
use quick_xml::name::{Namespace, ResolveResult};
use quick_xml::reader::NsReader;
use std::collections::{BTreeMap, HashMap};

const WSDL_NS: &[u8] = b"http://schemas.xmlsoap.org/wsdl/";
const WSDL_SOAP11_NS: &[u8] = b"http://schemas.xmlsoap.org/wsdl/soap/";
const WSDL_SOAP12_NS: &[u8] = b"http://schemas.xmlsoap.org/wsdl/soap12/";
const XSD_NS: &[u8] = b"http://www.w3.org/2001/XMLSchema";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WsdlOperation {
    pub name: String,
    pub soap_action: Option<String>,
    pub input_element: String,
    pub parameters: Vec<String>,
    pub output_element: String,
}

#[derive(Debug, Clone)]
pub struct WsdlDocument {
    pub target_namespace: String,
    pub service_name: Option<String>,
    pub endpoint: String,
    operations: BTreeMap<String, WsdlOperation>,
}

impl WsdlDocument {
    pub fn parse(xml: &str) -> Result<Self> {
        let mut parser = WsdlParser::default();
        let mut reader = NsReader::from_str(xml);
        reader.config_mut().trim_text(true);

        loop {
            let (ns, event) = reader.read_resolved_event()?;
            let ns = Ns::classify(&ns);
            match event {
                Event::Start(e) => {
                    parser.open(ns, &e)?;
                    parser.path.push((ns, local_name(&e)));
                }
                Event::Empty(e) => {
                    parser.open(ns, &e)?;
                    parser.close(ns, &local_name(&e));
                }
                Event::End(_) => {
                    if let Some((ns, name)) = parser.path.pop() {
                        parser.close(ns, &name);
                    }
                }
                Event::Eof => break,
                _ => {}
            }
        }

        parser.finish()
    }

    pub fn operation(&self, name: &str) -> Option<&WsdlOperation> {
        self.operations.get(name)
    }

    pub fn operation_names(&self) -> impl Iterator<Item = &str> {
        self.operations.keys().map(String::as_str)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Ns {
    Wsdl,
    Soap11,
    Soap12,
    Schema,
    Other,
}

impl Ns {
    fn classify(ns: &ResolveResult) -> Self {
        match ns {
            ResolveResult::Bound(Namespace(uri)) => match *uri {
                WSDL_NS => Ns::Wsdl,
                WSDL_SOAP11_NS => Ns::Soap11,
                WSDL_SOAP12_NS => Ns::Soap12,
                XSD_NS => Ns::Schema,
                _ => Ns::Other,
            },
            _ => Ns::Other,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Section {
    #[default]
    None,
    PortType,
    Binding { soap11: bool },
}

#[derive(Debug, Default)]
struct PortOperation {
    input_message: Option<String>,
    output_message: Option<String>,
}

#[derive(Debug, Default)]
struct WsdlParser {
    path: Vec<(Ns, String)>,
    section: Section,
    target_namespace: Option<String>,
    service_name: Option<String>,
    soap11_address: Option<String>,
    soap12_address: Option<String>,
    // top-level schema element -> names in its sequence
    schema_elements: HashMap<String, Vec<String>>,
    // (element name, path length at which its sequence children open)
    open_schema_element: Option<(String, usize)>,
    // message name -> element referenced by its part
    messages: HashMap<String, String>,
    open_message: Option<String>,
    port_operations: Vec<(String, PortOperation)>,
    soap_actions: HashMap<String, String>,
    open_operation: Option<String>,
}

impl WsdlParser {
    fn parent(&self) -> Option<(Ns, &str)> {
        self.path.last().map(|(ns, name)| (*ns, name.as_str()))
    }

    fn open(&mut self, ns: Ns, e: &BytesStart) -> Result<()> {
        let name = local_name(e);
        match (ns, name.as_str()) {
            (Ns::Wsdl, "definitions") => {
                self.target_namespace = attribute(e, "targetNamespace")?;
            }
            (Ns::Schema, "element") => self.open_schema_element(e)?,
            (Ns::Wsdl, "message") => {
                self.open_message = attribute(e, "name")?;
            }
            (Ns::Wsdl, "part") => {
                if let (Some(message), Some(element)) =
                    (self.open_message.clone(), attribute(e, "element")?)
                {
                    self.messages
                        .entry(message)
                        .or_insert_with(|| strip_prefix(&element).to_string());
                }
            }
            (Ns::Wsdl, "portType") => self.section = Section::PortType,
            (Ns::Wsdl, "binding") => self.section = Section::Binding { soap11: false },
            (Ns::Soap11, "binding") => {
                if let Section::Binding { .. } = self.section {
                    self.section = Section::Binding { soap11: true };
                }
            }
            (Ns::Wsdl, "operation") => {
                let op_name = attribute(e, "name")?;
                if self.section == Section::PortType {
                    if let Some(op_name) = &op_name {
                        if !self.port_operations.iter().any(|(n, _)| n == op_name) {
                            self.port_operations
                                .push((op_name.clone(), PortOperation::default()));
                        }
                    }
                }
                self.open_operation = op_name;
            }
            (Ns::Wsdl, "input") | (Ns::Wsdl, "output") if self.section == Section::PortType => {
                let message = attribute(e, "message")?.map(|m| strip_prefix(&m).to_string());
                let is_input = name == "input";
                if let Some(op) = self.current_port_operation() {
                    let slot = if is_input {
                        &mut op.input_message
                    } else {
                        &mut op.output_message
                    };
                    if slot.is_none() {
                        *slot = message;
                    }
                }
            }
            (Ns::Soap11, "operation") => {
                if let (Section::Binding { soap11: true }, Some(op_name)) =
                    (self.section, self.open_operation.clone())
                {
                    if let Some(action) = attribute(e, "soapAction")? {
                        self.soap_actions.entry(op_name).or_insert(action);
                    }
                }
            }
            (Ns::Wsdl, "service") => {
                if self.service_name.is_none() {
                    self.service_name = attribute(e, "name")?;
                }
            }
            (Ns::Soap11, "address") => {
                if self.soap11_address.is_none() {
                    self.soap11_address = attribute(e, "location")?;
                }
            }
            (Ns::Soap12, "address") => {
                if self.soap12_address.is_none() {
                    self.soap12_address = attribute(e, "location")?;
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn open_schema_element(&mut self, e: &BytesStart) -> Result<()> {
        let Some(element_name) = attribute(e, "name")? else {
            return Ok(());
        };

        if matches!(self.parent(), Some((Ns::Schema, "schema"))) {
            self.schema_elements.entry(element_name.clone()).or_default();
            // children sit at element/complexType/sequence
            self.open_schema_element = Some((element_name, self.path.len() + 3));
            return Ok(());
        }

        if let Some((owner, depth)) = &self.open_schema_element {
            if self.path.len() == *depth && matches!(self.parent(), Some((Ns::Schema, "sequence"))) {
                if let Some(params) = self.schema_elements.get_mut(owner) {
                    params.push(element_name);
                }
            }
        }
        Ok(())
    }

    fn close(&mut self, ns: Ns, name: &str) {
        match (ns, name) {
            (Ns::Schema, "element") => {
                // closing a top-level element leaves the path at schema level again
                if matches!(self.parent(), Some((Ns::Schema, "schema"))) {
                    self.open_schema_element = None;
                }
            }
            (Ns::Wsdl, "message") => self.open_message = None,
            (Ns::Wsdl, "operation") => self.open_operation = None,
            (Ns::Wsdl, "portType") | (Ns::Wsdl, "binding") => self.section = Section::None,
            _ => {}
        }
    }

    fn current_port_operation(&mut self) -> Option<&mut PortOperation> {
        let name = self.open_operation.as_deref()?;
        self.port_operations
            .iter_mut()
            .find(|(n, _)| n == name)
            .map(|(_, op)| op)
    }

    fn finish(self) -> Result<WsdlDocument> {
        let target_namespace = self.target_namespace.ok_or_else(|| DemoError::WsdlError {
            message: "definitions element has no targetNamespace".to_string(),
        })?;

        let endpoint = match (self.soap11_address, self.soap12_address) {
            (Some(address), _) => address,
            (None, Some(address)) => {
                tracing::warn!("No SOAP 1.1 port found, using SOAP 1.2 address {}", address);
                address
            }
            (None, None) => {
                return Err(DemoError::WsdlError {
                    message: "no SOAP service address found".to_string(),
                })
            }
        };

        let mut operations = BTreeMap::new();
        for (name, port_op) in self.port_operations {
            let input_element = port_op
                .input_message
                .and_then(|m| self.messages.get(&m).cloned())
                .unwrap_or_else(|| name.clone());
            let output_element = port_op
                .output_message
                .and_then(|m| self.messages.get(&m).cloned())
                .unwrap_or_else(|| format!("{}Response", name));
            let parameters = self
                .schema_elements
                .get(&input_element)
                .cloned()
                .unwrap_or_default();

            operations.insert(
                name.clone(),
                WsdlOperation {
                    soap_action: self.soap_actions.get(&name).cloned(),
                    name,
                    input_element,
                    parameters,
                    output_element,
                },
            );
        }

        tracing::debug!(
            "Parsed WSDL: namespace={}, endpoint={}, {} operations",
            target_namespace,
            endpoint,
            operations.len()
        );

        Ok(WsdlDocument {
            target_namespace,
            service_name: self.service_name,
            endpoint,
            operations,
        })
    }
}

fn local_name(e: &BytesStart) -> String {
    String::from_utf8_lossy(e.local_name().as_ref()).into_owned()
}

fn attribute(e: &BytesStart, name: &str) -> Result<Option<String>> {
    for attr in e.attributes() {
        let attr = attr.map_err(quick_xml::Error::from)?;
        if attr.key.as_ref() == name.as_bytes() {
            let value = attr.unescape_value().map_err(quick_xml::Error::from)?;
            return Ok(Some(value.into_owned()));
        }
    }
    Ok(None)
}

fn strip_prefix(qname: &str) -> &str {
    qname.rsplit(':').next().unwrap_or(qname)
}
