//! XPDL `MultiInstance` loop attributes of an activity

use std::io::Write;

use quick_xml::Writer;
use trellis_core::Shape;

use crate::error::XpdlError;
use crate::xml::{attrs, write_empty, ToXml};

/// Value of the `looptype` property marking a multi-instance activity.
pub const MULTI_INSTANCE_LOOP: &str = "MultiInstance";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct XpdlMultiInstance {
    pub mi_condition: Option<String>,
    pub loop_counter: Option<String>,
    pub mi_ordering: Option<String>,
    pub mi_flow_condition: Option<String>,
    pub complex_mi_flow_condition: Option<String>,
}

impl XpdlMultiInstance {
    pub fn is_multi_instance(shape: &Shape) -> bool {
        shape.property("looptype") == Some(MULTI_INSTANCE_LOOP)
    }

    pub fn from_shape(shape: &Shape) -> Self {
        let prop = |name: &str| shape.property(name).map(str::to_string);
        XpdlMultiInstance {
            mi_condition: prop("mi_condition"),
            loop_counter: prop("loopcounter"),
            mi_ordering: prop("mi_ordering"),
            mi_flow_condition: prop("mi_flowcondition"),
            complex_mi_flow_condition: prop("complex_micondition"),
        }
    }

    pub(crate) fn from_attrs(attributes: &[(String, String)]) -> Self {
        let mut mi = XpdlMultiInstance::default();
        for (key, value) in attributes {
            let slot = match key.as_str() {
                "MI_Condition" => &mut mi.mi_condition,
                "LoopCounter" => &mut mi.loop_counter,
                "MI_Ordering" => &mut mi.mi_ordering,
                "MI_FlowCondition" => &mut mi.mi_flow_condition,
                "ComplexMI_FlowCondition" => &mut mi.complex_mi_flow_condition,
                _ => continue,
            };
            *slot = Some(value.clone());
        }
        mi
    }
}

impl ToXml for XpdlMultiInstance {
    fn write_xml<W: Write>(&self, writer: &mut Writer<W>) -> Result<(), XpdlError> {
        let attributes = attrs(&[
            ("MI_Condition", self.mi_condition.as_deref()),
            ("LoopCounter", self.loop_counter.as_deref()),
            ("MI_Ordering", self.mi_ordering.as_deref()),
            ("MI_FlowCondition", self.mi_flow_condition.as_deref()),
            ("ComplexMI_FlowCondition", self.complex_mi_flow_condition.as_deref()),
        ]);
        write_empty(writer, "MultiInstance", &attributes)
    }
}
